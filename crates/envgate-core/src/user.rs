use serde::{Deserialize, Serialize};

/// Signed-in user as reported by the identity backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_image: Option<String>,
}

impl User {
    /// Two-letter avatar initials, falling back to the email and finally "U"
    pub fn initials(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();

        let initials: String = match (first.chars().next(), last.chars().next()) {
            (Some(f), Some(l)) => [f, l].iter().collect(),
            (Some(_), None) => first.chars().take(2).collect(),
            _ if !self.email.is_empty() => self.email.chars().take(2).collect(),
            _ => "U".to_string(),
        };

        initials.to_uppercase()
    }

    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        if !self.full_name.is_empty() {
            &self.full_name
        } else if !self.first_name.is_empty() {
            &self.first_name
        } else {
            &self.email
        }
    }
}

/// Outcome of the "who am I" call, normalized across response shapes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl AuthStatus {
    pub fn authenticated(user: User) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }
}
