use std::path::Path;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::utils::now_millis;

/// 执行一次任务完成副作用：向任务日志追加一行完成记录
///
/// 排空循环极少数情况下可能对同一提交重复调用，追加写入可以容忍。
pub async fn execute(task_log_path: &str, user_id: &str) -> Result<(), std::io::Error> {
    if let Some(parent) = Path::new(task_log_path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let line = format!("{}-task completed at-{}\n", user_id, now_millis());

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(task_log_path)
        .await?;
    file.write_all(line.as_bytes()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn appends_one_line_per_completion() {
        let path = std::env::temp_dir().join(format!("task_log_{}.txt", uuid::Uuid::new_v4()));
        let path = path.to_str().unwrap().to_string();

        execute(&path, "alice").await.unwrap();
        execute(&path, "bob").await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("alice-task completed at-"));
        assert!(lines[1].starts_with("bob-task completed at-"));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn creates_missing_log_directory() {
        let dir = std::env::temp_dir().join(format!("task_logs_{}", uuid::Uuid::new_v4()));
        let path = dir.join("task_log.txt");
        let path = path.to_str().unwrap().to_string();

        execute(&path, "carol").await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.contains("carol-task completed at-"));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
