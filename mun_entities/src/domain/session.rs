use sea_orm::prelude::Uuid;
use serde::{Serialize, Deserialize};


/// Who is making the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Session {
    Authenticated {
        user_id: Uuid,
        email: String
    },
    Anonymous
}

impl Session {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Session::Authenticated { user_id, .. } => Some(*user_id),
            Session::Anonymous => None
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Session::Authenticated { email, .. } => Some(email.as_str()),
            Session::Anonymous => None
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }
}
