use crate::error::{ApiError, ValidationError};
use crate::types::{User, UserCreate, UserLogin};
use crate::validation::{require, validate_email, validate_password_confirmation};

/// The signed-in user for the lifetime of the application.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl Session {
    /// Derived from the user record; there is no separate flag to fall out of
    /// sync with it.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    pub fn clear(&mut self) {
        self.user = None;
        self.is_loading = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl LoginForm {
    pub fn set(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Username => self.username = value,
            LoginField::Password => self.password = value,
        }
    }

    pub fn credentials(&self) -> Result<UserLogin, ValidationError> {
        require(&self.username, "username")?;
        require(&self.password, "password")?;
        Ok(UserLogin {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Username,
    Email,
    FullName,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub confirm_password: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl RegisterForm {
    pub fn set(&mut self, field: RegisterField, value: String) {
        match field {
            RegisterField::Username => self.username = value,
            RegisterField::Email => self.email = value,
            RegisterField::FullName => self.full_name = value,
            RegisterField::Password => self.password = value,
            RegisterField::ConfirmPassword => self.confirm_password = value,
        }
    }

    pub fn to_request(&self) -> Result<UserCreate, ValidationError> {
        require(&self.username, "username")?;
        validate_email(&self.email)?;
        require(&self.password, "password")?;
        validate_password_confirmation(&self.password, &self.confirm_password)?;

        let full_name = self.full_name.trim();
        Ok(UserCreate {
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            full_name: (!full_name.is_empty()).then(|| full_name.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Look for a stored token at startup and fetch its user.
    Restore,
    Restored(Result<Option<User>, ApiError>),

    LoginInput { field: LoginField, value: String },
    SubmitLogin,
    LoginFinished(Result<User, ApiError>),

    RegisterInput { field: RegisterField, value: String },
    SubmitRegister,
    RegisterFinished(Result<User, ApiError>),

    Logout,
}

impl SessionAction {
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SessionAction::Restored(Err(e))
            | SessionAction::LoginFinished(Err(e))
            | SessionAction::RegisterFinished(Err(e)) => Some(e),
            _ => None,
        }
    }
}
