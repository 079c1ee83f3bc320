//! 提交目录名解析服务
//!
//! 目录名格式：`[显示名 - ]学号[@域名[ DD-MM-YYYY HH_MM_SS]]`
//!
//! 解析按阶段进行：显示名 → 学号 → 域名 → 提交时间。
//! 只锚定开头，不锚定结尾；尾部无法识别的文本由 [`TrailingText`] 决定是否忽略。

use crate::error::NameParseError;
use crate::models::{EmailDomain, SubmissionIdentity, SubmissionTimestamp};
use once_cell::sync::Lazy;
use regex::Regex;

static MATRICULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+").expect("valid matricule regex"));

static DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@(ecam\.be|student\.ecam\.be)").expect("valid domain regex"));

static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ (\d{2})-(\d{2})-(\d{4}) (\d{2})_(\d{2})_(\d{2})").expect("valid timestamp regex")
});

const NAME_SEPARATOR: &str = " - ";

/// 尾部文本处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingText {
    /// 忽略无法识别的尾部文本
    #[default]
    Ignore,
    /// 拒绝含有尾部文本的目录名
    Reject,
}

/// 目录名解析器
#[derive(Debug, Clone, Copy, Default)]
pub struct NameParser {
    trailing: TrailingText,
}

impl NameParser {
    pub fn new(trailing: TrailingText) -> Self {
        Self { trailing }
    }

    pub fn parse(&self, dir_name: &str) -> Result<SubmissionIdentity, NameParseError> {
        parse_dir_name(dir_name, self.trailing)
    }
}

/// 解析提交目录名
pub fn parse_dir_name(
    dir_name: &str,
    trailing: TrailingText,
) -> Result<SubmissionIdentity, NameParseError> {
    let (display_name, rest) = split_display_name(dir_name);

    let matricule = MATRICULE
        .find(rest)
        .ok_or_else(|| NameParseError::NoMatricule {
            name: dir_name.to_string(),
        })?;
    let mut rest = &rest[matricule.end()..];

    let mut domain = None;
    let mut submitted_at = None;

    if let Some(caps) = DOMAIN.captures(rest) {
        domain = Some(match &caps[1] {
            "student.ecam.be" => EmailDomain::StudentEcam,
            _ => EmailDomain::Ecam,
        });
        rest = &rest[caps[0].len()..];

        // 提交时间只能出现在域名之后
        if let Some(caps) = TIMESTAMP.captures(rest) {
            submitted_at = Some(SubmissionTimestamp {
                day: caps[1].to_string(),
                month: caps[2].to_string(),
                year: caps[3].to_string(),
                hour: caps[4].to_string(),
                minute: caps[5].to_string(),
                second: caps[6].to_string(),
            });
            rest = &rest[caps[0].len()..];
        }
    }

    if trailing == TrailingText::Reject && !rest.is_empty() {
        return Err(NameParseError::TrailingInput {
            name: dir_name.to_string(),
            rest: rest.to_string(),
        });
    }

    Ok(SubmissionIdentity {
        display_name: display_name.map(str::to_string),
        matricule: matricule.as_str().to_string(),
        domain,
        submitted_at,
    })
}

/// 拆分显示名
///
/// 显示名是贪婪的：取最后一个后面紧跟学号的 ` - `。
/// 没有合适的分隔符时，整个目录名从学号开始。
fn split_display_name(dir_name: &str) -> (Option<&str>, &str) {
    let candidates = (0..dir_name.len())
        .rev()
        .filter(|&i| dir_name.is_char_boundary(i) && dir_name[i..].starts_with(NAME_SEPARATOR));

    for pos in candidates {
        let name = &dir_name[..pos];
        let rest = &dir_name[pos + NAME_SEPARATOR.len()..];
        if !name.contains('\n') && MATRICULE.is_match(rest) {
            return (Some(name), rest);
        }
    }

    (None, dir_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str) -> SubmissionIdentity {
        parse_dir_name(name, TrailingText::Ignore).unwrap()
    }

    #[test]
    fn test_name_and_matricule_without_domain() {
        let identity = parse("Doe John - 12345");
        assert_eq!(identity.display_name.as_deref(), Some("Doe John"));
        assert_eq!(identity.matricule, "12345");
        assert_eq!(identity.email(), "12345@ecam.be");
        assert!(identity.submitted_at.is_none());
    }

    #[test]
    fn test_full_name_with_student_domain_and_timestamp() {
        let identity = parse("Doe John - 12345@student.ecam.be 04-09-2023 14_05_00");
        assert_eq!(identity.matricule, "12345");
        assert_eq!(identity.domain, Some(EmailDomain::StudentEcam));
        assert_eq!(identity.email(), "12345@student.ecam.be");
        assert_eq!(
            identity.submitted_at.unwrap().to_string(),
            "04/09/2023 14:05:00"
        );
    }

    #[test]
    fn test_matricule_with_domain_only() {
        let identity = parse("12345@ecam.be");
        assert!(identity.display_name.is_none());
        assert_eq!(identity.domain, Some(EmailDomain::Ecam));
        assert_eq!(identity.email(), "12345@ecam.be");
    }

    #[test]
    fn test_display_name_takes_last_separator() {
        let identity = parse("Jean - Pierre - 42");
        assert_eq!(identity.display_name.as_deref(), Some("Jean - Pierre"));
        assert_eq!(identity.matricule, "42");
    }

    #[test]
    fn test_separator_without_matricule_is_part_of_nothing() {
        // 末尾的 " - " 后面没有学号，退回到从开头读取学号
        let identity = parse("Doe John - ");
        assert!(identity.display_name.is_none());
        assert_eq!(identity.matricule, "Doe");
    }

    #[test]
    fn test_unicode_word_characters() {
        let identity = parse("Élodie Müller - é123");
        assert_eq!(identity.display_name.as_deref(), Some("Élodie Müller"));
        assert_eq!(identity.matricule, "é123");
    }

    #[test]
    fn test_trailing_garbage_is_ignored_by_default() {
        let identity = parse("123abc-garbage");
        assert!(identity.display_name.is_none());
        assert_eq!(identity.matricule, "123abc");
        assert_eq!(identity.email(), "123abc@ecam.be");
    }

    #[test]
    fn test_trailing_garbage_rejected_in_strict_mode() {
        let err = parse_dir_name("123abc-garbage", TrailingText::Reject).unwrap_err();
        assert_eq!(
            err,
            NameParseError::TrailingInput {
                name: "123abc-garbage".to_string(),
                rest: "-garbage".to_string(),
            }
        );

        let ok = parse_dir_name("Doe - 1@student.ecam.be 01-02-2024 10_00_59", TrailingText::Reject);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_unknown_domain_is_not_captured() {
        let identity = parse("Doe - 42@gmail.com");
        assert_eq!(identity.domain, None);
        assert_eq!(identity.email(), "42@ecam.be");
    }

    #[test]
    fn test_timestamp_requires_domain() {
        let identity = parse("Doe - 42 04-09-2023 14_05_00");
        assert!(identity.submitted_at.is_none());
        assert!(parse_dir_name("Doe - 42 04-09-2023 14_05_00", TrailingText::Reject).is_err());
    }

    #[test]
    fn test_incomplete_timestamp_is_dropped() {
        let identity = parse("42@ecam.be 04-09-2023");
        assert_eq!(identity.domain, Some(EmailDomain::Ecam));
        assert!(identity.submitted_at.is_none());
    }

    #[test]
    fn test_unparseable_names() {
        for name in ["", "- -", "@ecam.be", " - "] {
            let err = parse_dir_name(name, TrailingText::Ignore).unwrap_err();
            assert!(matches!(err, NameParseError::NoMatricule { .. }), "{name:?}");
        }
    }

    #[test]
    fn test_parser_struct_uses_policy() {
        let parser = NameParser::new(TrailingText::Reject);
        assert!(parser.parse("42 extra").is_err());
        assert!(NameParser::default().parse("42 extra").is_ok());
    }
}
