// app-client/tests/client_integration.rs
// 集成测试: 通过 wiremock 模拟后端

use app_client::models::{
    Dish, DishQuery, FridaStartRequest, StartAnalysisRequest, SubmitTaskRequest, Task, TaskQuery,
    TaskStatus,
};
use app_client::{AppClient, ClientConfig, ClientError, FilePart, PageQuery};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{
    body_json, body_string, body_string_contains, header, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AppClient {
    AppClient::new(&ClientConfig::new(server.uri()).with_token("test-token")).unwrap()
}

#[tokio::test]
async fn test_list_dish_sends_query_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/dish/list"))
        .and(query_param("pageNum", "1"))
        .and(query_param("pageSize", "10"))
        .and(query_param("name", "鱼"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "rows": [{ "id": 3, "name": "酸菜鱼", "price": 58.0 }],
            "code": 200,
            "msg": "查询成功"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = DishQuery {
        page: PageQuery::new(1, 10),
        name: Some("鱼".into()),
        ..Default::default()
    };
    let table = client_for(&server).dish().list(&query).await.unwrap();
    assert_eq!(table.total, 1);
    assert_eq!(table.rows[0].name, "酸菜鱼");
    assert_eq!(table.rows[0].price, Some(Decimal::new(58, 0)));
}

#[tokio::test]
async fn test_get_dish() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/dish/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "操作成功",
            "data": { "id": 42, "name": "宫保鸡丁", "createTime": "2025-09-30 10:00:00" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).dish().get(42).await.unwrap();
    let dish = result.data.unwrap();
    assert_eq!(dish.id, Some(42));
    assert!(dish.create_time.is_some());
}

#[tokio::test]
async fn test_create_dish_posts_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/dish"))
        .and(body_json(json!({ "name": "回锅肉", "price": 32.5 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "msg": "操作成功" })))
        .expect(1)
        .mount(&server)
        .await;

    let dish = Dish::new("回锅肉").with_price(Decimal::new(325, 1));
    let result = client_for(&server).dish().create(&dish).await.unwrap();
    assert!(result.is_success());
}

#[tokio::test]
async fn test_failure_envelope_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/app/dish"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 500, "msg": "修改失败" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .dish()
        .update(&Dish::new("x").with_id(1))
        .await
        .unwrap_err();
    match err {
        ClientError::Api { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "修改失败");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_status_errors() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/app/dish/1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/app/task/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.dish().delete(1).await.unwrap_err(),
        ClientError::Unauthorized(_)
    ));
    assert!(matches!(
        client.task().get(404).await.unwrap_err(),
        ClientError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let client = AppClient::new(&ClientConfig::new("http://127.0.0.1:1").with_timeout(2)).unwrap();
    let err = client.task().get_sample_list().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}

#[tokio::test]
async fn test_upload_app_is_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/task/upload"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"file\"; filename=\"demo.apk\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "文件上传成功",
            "fileName": "0a1b_demo.apk",
            "originalFilename": "demo.apk",
            "filePath": "/opt/apk/0a1b_demo.apk",
            "fileSize": 2,
            "url": "http://files/apk/0a1b_demo.apk"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = FilePart::from_bytes("demo.apk", b"PK".to_vec());
    let uploaded = client_for(&server).task().upload_app(file).await.unwrap();
    assert_eq!(uploaded.file_path, "/opt/apk/0a1b_demo.apk");
    assert_eq!(uploaded.original_filename, "demo.apk");
    assert_eq!(uploaded.file_size, 2);
}

#[tokio::test]
async fn test_upload_apps_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("one.apk");
    let second = dir.path().join("two.ipa");
    std::fs::write(&first, b"A").unwrap();
    std::fs::write(&second, b"B").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/task/uploads"))
        .and(body_string_contains("filename=\"one.apk\""))
        .and(body_string_contains("filename=\"two.ipa\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "成功上传 2 个文件",
            "fileNames": ["x_one.apk", "y_two.ipa"],
            "filePaths": ["/opt/apk/x_one.apk", "/opt/apk/y_two.ipa"],
            "originalFilenames": ["one.apk", "two.ipa"],
            "fileSizes": [1, 1]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let files = vec![
        FilePart::from_path(&first).await.unwrap(),
        FilePart::from_path(&second).await.unwrap(),
    ];
    let batch = client_for(&server).task().upload_apps(files).await.unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.original_filenames, vec!["one.apk", "two.ipa"]);
}

#[tokio::test]
async fn test_submit_and_download_from_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/task/download"))
        .and(body_json(json!({ "url": "http://x/y.apk" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "下载成功",
            "filePath": "/opt/apk/y.apk"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/app/task/submit"))
        .and(body_json(json!({ "taskName": "demo", "filePaths": ["/opt/apk/y.apk"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "任务提交成功",
            "taskId": 1727664000000i64,
            "taskName": "demo",
            "apkPath": "/opt/apk/y.apk",
            "fileCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let downloaded = client.task().download_app_from_url("http://x/y.apk").await.unwrap();
    let file_path = downloaded.extra["filePath"].as_str().unwrap().to_string();

    let submitted = client
        .task()
        .submit(&SubmitTaskRequest::new("demo", vec![file_path]))
        .await
        .unwrap();
    assert_eq!(submitted.task_id, 1727664000000);
    assert_eq!(submitted.file_count, 1);
}

#[tokio::test]
async fn test_task_lifecycle_routes() {
    let server = MockServer::start().await;
    let ok = || ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "msg": "操作成功" }));
    Mock::given(method("PUT")).and(path("/app/task/cancel/7")).respond_with(ok()).expect(1).mount(&server).await;
    Mock::given(method("PUT")).and(path("/app/task/restart/7")).respond_with(ok()).expect(1).mount(&server).await;
    Mock::given(method("DELETE")).and(path("/app/task/1,2,3")).respond_with(ok()).expect(1).mount(&server).await;

    let client = client_for(&server);
    assert!(client.task().cancel(7).await.unwrap().is_success());
    assert!(client.task().restart(7).await.unwrap().is_success());
    let ids = app_client::join_ids(&[1, 2, 3]);
    assert!(client.task().delete_batch(&ids).await.unwrap().is_success());
}

#[tokio::test]
async fn test_download_report_returns_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/task/report/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"%PDF-1.7".to_vec(), "application/pdf")
                .insert_header(
                    "content-disposition",
                    "attachment; filename*=utf-8''%E6%8A%A5%E5%91%8A.pdf",
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let blob = client_for(&server).task().download_report(7).await.unwrap();
    assert_eq!(blob.bytes, b"%PDF-1.7");
    assert_eq!(blob.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(blob.file_name.as_deref(), Some("报告.pdf"));
}

#[tokio::test]
async fn test_export_task_json_error_instead_of_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/task/export"))
        .and(query_param("taskName", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 500, "msg": "导出失败" })))
        .expect(1)
        .mount(&server)
        .await;

    let query = TaskQuery {
        task_name: Some("demo".into()),
        ..Default::default()
    };
    let err = client_for(&server).task().export(&query).await.unwrap_err();
    assert_eq!(err.api_code(), Some(500));
}

#[tokio::test]
async fn test_export_dish_posts_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/dish/export"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("status=0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"PK\x03\x04".to_vec(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let query = DishQuery {
        status: Some("0".into()),
        ..Default::default()
    };
    let blob = client_for(&server).dish().export(&query).await.unwrap();
    assert_eq!(blob.len(), 4);
    assert!(blob.file_name.is_none());
}

#[tokio::test]
async fn test_task_crud_routes() {
    let server = MockServer::start().await;
    let ok = || ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "msg": "操作成功" }));
    Mock::given(method("GET"))
        .and(path("/app/task/list"))
        .and(query_param("status", "running"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "rows": [
                { "id": 1, "taskName": "nightly", "status": "running", "createTime": "2025-09-30 10:00:00" },
                { "id": 2, "taskName": "adhoc", "status": "queued" }
            ],
            "code": 200,
            "msg": "查询成功"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/app/task"))
        .and(body_json(json!({ "taskName": "nightly" })))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/app/task"))
        .and(body_json(json!({ "id": 1, "taskName": "nightly", "remark": "rerun" })))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE")).and(path("/app/task/1")).respond_with(ok()).expect(1).mount(&server).await;

    let client = client_for(&server);
    let query = TaskQuery {
        status: Some(TaskStatus::Running),
        ..Default::default()
    };
    let table = client.task().list(&query).await.unwrap();
    assert_eq!(table.total, 2);
    assert_eq!(table.rows[0].status, Some(TaskStatus::Running));
    assert!(table.rows[0].create_time.is_some());
    assert_eq!(table.rows[1].status, Some(TaskStatus::Unknown));

    let mut task = Task {
        task_name: "nightly".into(),
        ..Default::default()
    };
    assert!(client.task().create(&task).await.unwrap().is_success());

    task.id = Some(1);
    task.remark = Some("rerun".into());
    assert!(client.task().update(&task).await.unwrap().is_success());
    assert!(client.task().delete(1).await.unwrap().is_success());
}

#[tokio::test]
async fn test_sample_list_decodes_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/task/samples"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "操作成功",
            "data": [
                { "fileName": "sample.apk", "filePath": "/opt/samples/sample.apk", "fileSize": 4096 },
                { "fileName": "sample.ipa", "filePath": "/opt/samples/sample.ipa" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).task().get_sample_list().await.unwrap();
    let samples = result.data.unwrap();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].file_size, 4096);
    assert_eq!(samples[1].file_path, "/opt/samples/sample.ipa");
}

#[tokio::test]
async fn test_expired_session_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/task/samples"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "code": 401, "msg": "登录状态已过期" })))
        .mount(&server)
        .await;

    let err = client_for(&server).task().get_sample_list().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "登录状态已过期"));
}

#[tokio::test]
async fn test_dynamic_session_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/dynamic/start"))
        .and(body_json(json!({ "taskId": "42", "apkPath": "/opt/apk/y.apk" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "动态分析任务已启动",
            "taskId": "42",
            "vncUrl": "http://device:6080/vnc.html"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/app/dynamic/vncUrl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "操作成功",
            "vncUrl": "http://device:6080/vnc.html"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/app/dynamic/stop"))
        .and(body_json(json!({ "taskId": "42" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "msg": "分析已停止" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = StartAnalysisRequest::new("/opt/apk/y.apk").with_task_id(42);
    let session = client.dynamic().start(&request).await.unwrap();
    assert_eq!(session.task_id, "42");
    assert_eq!(session.vnc_url, "http://device:6080/vnc.html");

    let vnc = client.dynamic().vnc_url().await.unwrap();
    assert_eq!(vnc.vnc_url, session.vnc_url);

    let stopped = client.dynamic().stop(&session.task_id).await.unwrap();
    assert_eq!(stopped.msg, "分析已停止");
}

#[tokio::test]
async fn test_dynamic_start_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/dynamic/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 500, "msg": "APK路径不能为空" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .dynamic()
        .start(&StartAnalysisRequest::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { code: 500, ref message } if message == "APK路径不能为空"));
}

#[tokio::test]
async fn test_frida_session_and_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/dynamic/frida/start"))
        .and(body_json(json!({ "taskId": "42", "packageName": "com.example.app", "logLevel": "verbose" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "Frida检测已启动",
            "taskId": "42",
            "vncUrl": "http://device:6080/vnc.html",
            "logLevel": "verbose"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/app/dynamic/frida/stop"))
        .and(body_json(json!({ "taskId": "42" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "msg": "Frida检测已停止" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/app/dynamic/frida/report/info"))
        .and(query_param("taskId", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "操作成功",
            "reportPath": "/data/reports/42/frida_report.xlsx",
            "fileName": "frida_report.xlsx"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/app/dynamic/frida/report/download"))
        .and(query_param("taskId", "42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"PK\x03\x04".to_vec(), "application/vnd.ms-excel")
                .insert_header("content-disposition", "attachment; filename=frida_report.xlsx"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = FridaStartRequest {
        log_level: Some("verbose".into()),
        ..FridaStartRequest::new("com.example.app").with_task_id("42")
    };
    let session = client.dynamic().frida_start(&request).await.unwrap();
    assert_eq!(session.log_level.as_deref(), Some("verbose"));

    assert!(client.dynamic().frida_stop("42").await.unwrap().is_success());

    let info = client.dynamic().frida_report_info("42").await.unwrap();
    assert_eq!(info.file_name, "frida_report.xlsx");

    let report = client.dynamic().frida_report_download("42").await.unwrap();
    assert_eq!(report.len(), 4);
    assert_eq!(report.file_name.as_deref(), Some(info.file_name.as_str()));
}
