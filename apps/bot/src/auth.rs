pub const DENIED: &str = "❌ Sorry, you are not allowed to use this bot.";

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Access {
    Allow,
    Deny,
}

/// Single-principal gate. With no identity configured nobody is allowed in.
#[derive(Clone, Debug)]
pub struct Gate {
    authorized: Option<String>,
}

impl Gate {
    pub fn new(authorized: Option<String>) -> Self {
        Self { authorized }
    }

    pub fn is_configured(&self) -> bool {
        self.authorized.is_some()
    }

    pub fn authorize(&self, sender_identity: &str) -> Access {
        match &self.authorized {
            Some(id) if id == sender_identity => Access::Allow,
            _ => Access::Deny,
        }
    }
}
