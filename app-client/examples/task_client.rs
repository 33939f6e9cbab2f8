// app-client/examples/task_client.rs
// 检测任务客户端示例: 上传应用 -> 提交任务 -> 动态分析 -> 下载 Frida 报告
//
// Usage: task_client <apk-or-ipa> [task-name] [package-name]
// Reads APP_BASE_URL / APP_TOKEN / APP_TIMEOUT_SECS (a .env file works too).

use app_client::models::{FridaStartRequest, StartAnalysisRequest, SubmitTaskRequest, TaskQuery};
use app_client::{ClientConfig, FilePart, PageQuery};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("Usage: {} <apk-or-ipa> [task-name] [package-name]", args[0]);
        println!("  Example: {} ./demo.apk nightly-scan com.example.demo", args[0]);
        return Ok(());
    }
    let package = &args[1];
    let task_name = args.get(2).cloned().unwrap_or_else(|| "cli-task".to_string());
    let package_name = args.get(3).cloned();

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Connecting");
    let client = config.build_client()?;

    let uploaded = client.task().upload_app(FilePart::from_path(package).await?).await?;
    tracing::info!(path = %uploaded.file_path, size = uploaded.file_size, "Package uploaded");

    let submitted = client
        .task()
        .submit(&SubmitTaskRequest::new(&task_name, vec![uploaded.file_path]))
        .await?;
    tracing::info!(task_id = submitted.task_id, "Task submitted");

    let tasks = client
        .task()
        .list(&TaskQuery {
            page: PageQuery::new(1, 10),
            task_name: Some(task_name),
            ..Default::default()
        })
        .await?;
    for task in &tasks.rows {
        tracing::info!(id = ?task.id, name = %task.task_name, status = ?task.status, "Task");
    }

    let session = client
        .dynamic()
        .start(&StartAnalysisRequest::new(&submitted.apk_path).with_task_id(submitted.task_id))
        .await?;
    tracing::info!(task_id = %session.task_id, vnc = %session.vnc_url, "Dynamic analysis started");

    let Some(package_name) = package_name else {
        return Ok(());
    };

    let frida = client
        .dynamic()
        .frida_start(&FridaStartRequest {
            apk_path: Some(submitted.apk_path.clone()),
            ..FridaStartRequest::new(package_name).with_task_id(&session.task_id)
        })
        .await?;
    tracing::info!(task_id = %frida.task_id, level = ?frida.log_level, "Frida hooks attached");

    match client.dynamic().frida_report_info(&frida.task_id).await {
        Ok(info) => {
            let report = client.dynamic().frida_report_download(&frida.task_id).await?;
            let file_name = report.file_name.clone().unwrap_or(info.file_name);
            report.save_to(&file_name).await?;
            tracing::info!(%file_name, bytes = report.len(), "Report saved");
        }
        Err(e) => tracing::warn!("Report not ready: {}", e),
    }

    Ok(())
}
