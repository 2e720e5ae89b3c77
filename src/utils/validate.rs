use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{EduMatchError, Result};
use crate::models::auth::requests::SignUpRequest;
use crate::models::users::requests::UpdateUserRequest;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

const MAX_PERSON_NAME_LEN: usize = 64;

const WEAK_PASSWORDS: [&str; 9] = [
    "password",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "password1",
    "Password1",
    "Qwerty123",
    "Abcd1234",
];

pub fn validate_username(username: &str) -> std::result::Result<(), &'static str> {
    // 用户名长度校验：5 <= x <= 16
    if username.len() < 5 || username.len() > 16 {
        return Err("username length must be between 5 and 16 characters");
    }
    // 用户名格式校验：只能包含字母、数字、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> std::result::Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("email format is invalid");
    }
    Ok(())
}

fn validate_person_name(field: &str, value: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
    } else if value.chars().count() > MAX_PERSON_NAME_LEN {
        errors.push(format!(
            "{field} must be at most {MAX_PERSON_NAME_LEN} characters"
        ));
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 不能是常见弱密码
pub fn validate_password(password: &str) -> Vec<&'static str> {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("password must contain at least one digit");
    }
    if WEAK_PASSWORDS
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("password is too common, please choose a stronger password");
    }

    errors
}

/// 注册请求校验，返回全部字段错误
pub fn validate_sign_up(req: &SignUpRequest) -> Result<()> {
    let mut errors = Vec::new();

    validate_person_name("first_name", &req.first_name, &mut errors);
    validate_person_name("last_name", &req.last_name, &mut errors);
    if let Err(msg) = validate_username(&req.username) {
        errors.push(msg.to_string());
    }
    if let Some(email) = req.email.as_deref().filter(|e| !e.is_empty())
        && let Err(msg) = validate_email(email)
    {
        errors.push(msg.to_string());
    }
    errors.extend(validate_password(&req.password).into_iter().map(String::from));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(EduMatchError::Validation(errors))
    }
}

/// 资料更新校验，只检查提供的字段
pub fn validate_user_update(req: &UpdateUserRequest) -> Result<()> {
    let mut errors = Vec::new();

    if let Some(first_name) = &req.first_name {
        validate_person_name("first_name", first_name, &mut errors);
    }
    if let Some(last_name) = &req.last_name {
        validate_person_name("last_name", last_name, &mut errors);
    }
    if let Some(username) = &req.username
        && let Err(msg) = validate_username(username)
    {
        errors.push(msg.to_string());
    }
    if let Some(email) = req.email.as_deref().filter(|e| !e.is_empty())
        && let Err(msg) = validate_email(email)
    {
        errors.push(msg.to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(EduMatchError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up(username: &str, email: Option<&str>, password: &str) -> SignUpRequest {
        SignUpRequest {
            first_name: "Aziz".to_string(),
            last_name: "Karimov".to_string(),
            username: username.to_string(),
            email: email.map(String::from),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_empty());
        assert!(validate_password("SecurePass123").is_empty());
    }

    #[test]
    fn test_weak_passwords() {
        assert!(validate_password("Ab1").contains(&"password must be at least 8 characters long"));
        assert!(
            validate_password("abcd1234")
                .contains(&"password must contain at least one uppercase letter")
        );
        assert!(validate_password("AbcdEfgh").contains(&"password must contain at least one digit"));
        assert!(
            validate_password("Password1")
                .contains(&"password is too common, please choose a stronger password")
        );
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("aziz_k").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_sign_up_ok_without_email() {
        assert!(validate_sign_up(&sign_up("aziz_k", None, "SecurePass123")).is_ok());
        assert!(validate_sign_up(&sign_up("aziz_k", Some(""), "SecurePass123")).is_ok());
    }

    #[test]
    fn test_sign_up_collects_errors() {
        let err = validate_sign_up(&sign_up("a!", Some("nope"), "short")).unwrap_err();
        match err {
            EduMatchError::Validation(errors) => {
                assert!(errors.iter().any(|e| e.starts_with("username")));
                assert!(errors.contains(&"email format is invalid".to_string()));
                assert!(errors.iter().any(|e| e.starts_with("password")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_user_update_checks_present_fields() {
        assert!(validate_user_update(&UpdateUserRequest::default()).is_ok());
        let req = UpdateUserRequest {
            first_name: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            validate_user_update(&req),
            Err(EduMatchError::Validation(vec![
                "first_name is required".to_string()
            ]))
        );
    }
}
