//! Form payloads and their validation.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FormError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

/// A payload that can be checked before it is submitted.
pub trait Validate {
    fn validate(&self) -> Result<(), FormError>;
}

fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(())
    }
}

fn require_email(value: &str) -> Result<(), FormError> {
    require("email", value)?;
    if EMAIL_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(FormError::InvalidEmail(value.to_string()))
    }
}

/// Public contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Validate for ContactForm {
    fn validate(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require_email(&self.email)?;
        require("subject", &self.subject)?;
        require("message", &self.message)
    }
}

/// Support request raised from the dashboard's support screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Validate for SupportRequest {
    fn validate(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require_email(&self.email)?;
        require("subject", &self.subject)?;
        require("message", &self.message)
    }
}

/// Newsletter or early-access signup. Only an email address is collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub email: String,
}

impl Validate for Subscription {
    fn validate(&self) -> Result<(), FormError> {
        require_email(&self.email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "excel" => Ok(ExportFormat::Excel),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// Request to export sensor data or download a report. No file is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub format: ExportFormat,
}

impl Validate for ExportRequest {
    fn validate(&self) -> Result<(), FormError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactForm {
        ContactForm {
            name: "Ada Farmer".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Pricing".to_string(),
            message: "How much for three zones?".to_string(),
        }
    }

    #[test]
    fn test_contact_form_valid() {
        assert_eq!(contact().validate(), Ok(()));
    }

    #[test]
    fn test_contact_form_missing_fields() {
        let form = ContactForm {
            name: "  ".to_string(),
            ..contact()
        };
        assert_eq!(form.validate(), Err(FormError::MissingField("name")));

        let form = ContactForm {
            message: String::new(),
            ..contact()
        };
        assert_eq!(form.validate(), Err(FormError::MissingField("message")));

        assert_eq!(
            ContactForm::default().validate(),
            Err(FormError::MissingField("name"))
        );
    }

    #[test]
    fn test_email_shape() {
        for good in ["a@b.co", "first.last@farm.example.org", " padded@example.com "] {
            let sub = Subscription {
                email: good.to_string(),
            };
            assert_eq!(sub.validate(), Ok(()), "{}", good);
        }
        for bad in ["plainaddress", "no-at.example.com", "a@b", "a b@c.com", "@example.com"] {
            let sub = Subscription {
                email: bad.to_string(),
            };
            assert!(
                matches!(sub.validate(), Err(FormError::InvalidEmail(_))),
                "{}",
                bad
            );
        }
        assert_eq!(
            Subscription::default().validate(),
            Err(FormError::MissingField("email"))
        );
    }

    #[test]
    fn test_support_request_uses_contact_rules() {
        let req = SupportRequest {
            name: "Sam".to_string(),
            email: "sam@example".to_string(),
            subject: "Sensor offline".to_string(),
            message: "SM002 stopped reporting".to_string(),
        };
        assert!(matches!(req.validate(), Err(FormError::InvalidEmail(_))));
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("csv".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("excel".parse::<ExportFormat>(), Ok(ExportFormat::Excel));
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Excel.to_string(), "excel");
        let req = ExportRequest {
            format: ExportFormat::Csv,
        };
        assert_eq!(req.validate(), Ok(()));
    }
}
