use serde_json::{Map, Value as JsonValue};

/// 作业级元数据
///
/// 每个学生的报告都会合并同一份元数据；`comment` 字段单独保存，
/// 以便追加在本地收集到的评论之后。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentMetadata {
    /// 元数据中的评论
    pub comments: Vec<String>,
    /// 除 comment 以外的所有顶层字段（保持原顺序）
    pub fields: Map<String, JsonValue>,
}

impl AssignmentMetadata {
    pub fn new(comments: Vec<String>, fields: Map<String, JsonValue>) -> Self {
        Self { comments, fields }
    }
}
