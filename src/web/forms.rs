use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::NewTask;

const USERNAME_LENGTH: (usize, usize) = (4, 25);
const PASSWORD_MIN_LENGTH: usize = 8;
const TASK_NAME_LENGTH: (usize, usize) = (3, 100);
const TASK_DESCRIPTION_MAX_LENGTH: usize = 2000;

/// Messages per form field, in the shape the templates expect.
#[derive(Debug, Default, Serialize)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    fn into_result<T>(self, ok: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(ok)
        } else {
            Err(self)
        }
    }
}

// Lengths are measured in characters, not bytes.
fn check_length(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    (min, max): (usize, usize),
) {
    let len = value.chars().count();

    if len < min || len > max {
        errors.add(
            field,
            format!("Field must be between {min} and {max} characters long."),
        );
    }
}

#[derive(Debug, FromForm)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm: String,
    pub csrf_token: Option<String>,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        check_length(&mut errors, "username", &self.username, USERNAME_LENGTH);

        if self.password.chars().count() < PASSWORD_MIN_LENGTH {
            errors.add("password", "Password should be at least 8 characters");
        }

        if self.password != self.confirm {
            errors.add("confirm", "Passwords must match");
        }

        errors.into_result(())
    }
}

#[derive(Debug, FromForm)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: Option<String>,
}

impl LoginForm {
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, FromForm)]
pub struct TaskForm {
    pub task_name: String,
    pub task_description: Option<String>,
    pub csrf_token: Option<String>,
}

impl TaskForm {
    pub fn validate(self) -> Result<NewTask, FormErrors> {
        let mut errors = FormErrors::default();

        check_length(&mut errors, "task_name", &self.task_name, TASK_NAME_LENGTH);

        let description = self.task_description.filter(|d| !d.trim().is_empty());
        if let Some(description) = &description {
            if description.chars().count() > TASK_DESCRIPTION_MAX_LENGTH {
                errors.add(
                    "task_description",
                    format!("Field cannot be longer than {TASK_DESCRIPTION_MAX_LENGTH} characters."),
                );
            }
        }

        errors.into_result(NewTask {
            name: self.task_name,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            username: username.to_string(),
            password: password.to_string(),
            confirm: confirm.to_string(),
            csrf_token: None,
        }
    }

    fn task(name: &str, description: Option<&str>) -> TaskForm {
        TaskForm {
            task_name: name.to_string(),
            task_description: description.map(str::to_string),
            csrf_token: None,
        }
    }

    #[test]
    fn accepts_valid_registration() {
        assert!(register("John", "12345678", "12345678").validate().is_ok());
    }

    #[test]
    fn reports_each_registration_problem() {
        let errors = register("Jo", "123", "321").validate().unwrap_err();

        assert_eq!(
            errors.messages("username"),
            ["Field must be between 4 and 25 characters long."]
        );
        assert_eq!(
            errors.messages("password"),
            ["Password should be at least 8 characters"]
        );
        assert_eq!(errors.messages("confirm"), ["Passwords must match"]);
    }

    #[test]
    fn username_length_counts_characters() {
        // 4 Cyrillic letters are 8 bytes.
        assert!(register("Дина", "12345678", "12345678").validate().is_ok());
        assert!(register(&"я".repeat(25), "12345678", "12345678").validate().is_ok());
        assert!(register(&"я".repeat(26), "12345678", "12345678").validate().is_err());
    }

    #[test]
    fn login_requires_both_fields() {
        let login = |username: &str, password: &str| LoginForm {
            username: username.to_string(),
            password: password.to_string(),
            csrf_token: None,
        };

        assert!(login("Dina", "12345678").is_complete());
        assert!(!login("", "12345678").is_complete());
        assert!(!login("Dina", "").is_complete());
    }

    #[test]
    fn task_name_bounds() {
        assert!(task("12", None).validate().is_err());
        assert!(task("Пил", None).validate().is_ok());
        assert!(task(&"x".repeat(100), None).validate().is_ok());
        assert!(task(&"x".repeat(101), None).validate().is_err());
    }

    #[test]
    fn blank_description_is_absent() {
        let new_task = task("Пилатес", Some("   ")).validate().unwrap();
        assert_eq!(new_task.description, None);

        let new_task = task("Пилатес", Some("Вечером")).validate().unwrap();
        assert_eq!(new_task.description.as_deref(), Some("Вечером"));
    }

    #[test]
    fn description_is_limited() {
        let errors = task("Пилатес", Some(&"x".repeat(2001))).validate().unwrap_err();
        assert_eq!(errors.messages("task_description").len(), 1);
    }
}
