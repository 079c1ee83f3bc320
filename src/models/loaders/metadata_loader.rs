use crate::error::MetadataError;
use crate::models::metadata::AssignmentMetadata;
use serde_json::Value as JsonValue;
use std::path::Path;
use tokio::fs;

/// 从 JSON 文件加载作业元数据
pub async fn load_metadata(json_file_path: &Path) -> Result<AssignmentMetadata, MetadataError> {
    let content = fs::read_to_string(json_file_path)
        .await
        .map_err(|source| MetadataError::ReadFailed {
            path: json_file_path.to_path_buf(),
            source,
        })?;

    let value: JsonValue =
        serde_json::from_str(&content).map_err(|source| MetadataError::JsonParseFailed {
            path: json_file_path.to_path_buf(),
            source,
        })?;

    let metadata = metadata_from_value(value, json_file_path)?;

    tracing::info!(
        "成功加载元数据: {} 个字段, {} 条评论",
        metadata.fields.len(),
        metadata.comments.len()
    );

    Ok(metadata)
}

fn metadata_from_value(
    value: JsonValue,
    path: &Path,
) -> Result<AssignmentMetadata, MetadataError> {
    let JsonValue::Object(mut fields) = value else {
        return Err(MetadataError::NotAnObject {
            path: path.to_path_buf(),
        });
    };

    let comments = match fields.shift_remove("comment") {
        None => Vec::new(),
        Some(JsonValue::String(single)) => vec![single],
        Some(JsonValue::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                JsonValue::String(s) => Ok(s),
                _ => Err(MetadataError::BadComment {
                    path: path.to_path_buf(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(MetadataError::BadComment {
                path: path.to_path_buf(),
            })
        }
    };

    Ok(AssignmentMetadata::new(comments, fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_load_metadata_splits_comment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.json");
        std::fs::write(
            &path,
            r#"{"assignment": "Labo 1", "comment": ["À corriger"], "max": 20}"#,
        )
        .unwrap();

        let metadata = load_metadata(&path).await.unwrap();
        assert_eq!(metadata.comments, vec!["À corriger".to_string()]);
        assert_eq!(
            metadata.fields.keys().collect::<Vec<_>>(),
            vec!["assignment", "max"]
        );
    }

    #[test]
    fn test_single_string_comment_is_accepted() {
        let metadata =
            metadata_from_value(json!({"comment": "late"}), Path::new("m.json")).unwrap();
        assert_eq!(metadata.comments, vec!["late".to_string()]);
        assert!(metadata.fields.is_empty());
    }

    #[test]
    fn test_rejects_non_object_and_bad_comment() {
        let err = metadata_from_value(json!([1, 2]), Path::new("m.json")).unwrap_err();
        assert!(matches!(err, MetadataError::NotAnObject { .. }));

        let err = metadata_from_value(json!({"comment": [1]}), Path::new("m.json")).unwrap_err();
        assert!(matches!(err, MetadataError::BadComment { .. }));
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_metadata(&dir.path().join("absent.json")).await.unwrap_err();
        assert!(matches!(err, MetadataError::ReadFailed { .. }));
    }
}
