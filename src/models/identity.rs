//! 学生身份信息（由提交目录名解析而来）

use chrono::NaiveDateTime;
use std::fmt;

/// 学校邮箱域名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailDomain {
    /// ecam.be
    #[default]
    Ecam,
    /// student.ecam.be
    StudentEcam,
}

impl EmailDomain {
    pub fn as_str(self) -> &'static str {
        match self {
            EmailDomain::Ecam => "ecam.be",
            EmailDomain::StudentEcam => "student.ecam.be",
        }
    }
}

/// 提交时间
///
/// 保留目录名中的原始数字，渲染为 `DD/MM/YYYY HH:MM:SS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTimestamp {
    pub day: String,
    pub month: String,
    pub year: String,
    pub hour: String,
    pub minute: String,
    pub second: String,
}

impl SubmissionTimestamp {
    /// 转换为 chrono 时间；日期不合法时返回 None
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.to_string(), "%d/%m/%Y %H:%M:%S").ok()
    }
}

impl fmt::Display for SubmissionTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} {}:{}:{}",
            self.day, self.month, self.year, self.hour, self.minute, self.second
        )
    }
}

/// 学生身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionIdentity {
    /// 显示名（可选）
    pub display_name: Option<String>,
    /// 学号
    pub matricule: String,
    /// 目录名中给出的邮箱域名
    pub domain: Option<EmailDomain>,
    /// 提交时间
    pub submitted_at: Option<SubmissionTimestamp>,
}

impl SubmissionIdentity {
    /// 学生邮箱，未给出域名时默认为 ecam.be
    pub fn email(&self) -> String {
        format!(
            "{}@{}",
            self.matricule,
            self.domain.unwrap_or_default().as_str()
        )
    }
}

impl fmt::Display for SubmissionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "{} ({})", self.matricule, name),
            None => write!(f, "{} (None)", self.matricule),
        }
    }
}
