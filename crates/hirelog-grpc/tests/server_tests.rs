//! End-to-end tests over a real socket

use chrono::{TimeZone, Utc};
use hirelog_domain::{Application, Status};
use hirelog_grpc::conversions::timestamp_to_proto;
use hirelog_grpc::proto::applications_client::ApplicationsClient;
use hirelog_grpc::proto::{
    HealthCheckRequest, ListApplicationsRequest, SetInterviewsRequest, StatusType,
};
use hirelog_grpc::{start_server, ServerConfig};
use hirelog_store::ApplicationStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tonic::transport::Channel;

fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

async fn connect(port: u16) -> ApplicationsClient<Channel> {
    let endpoint = format!("http://127.0.0.1:{}", port);
    for _ in 0..50 {
        if let Ok(client) = ApplicationsClient::connect(endpoint.clone()).await {
            return client;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("server did not come up on {}", endpoint);
}

#[tokio::test]
async fn test_serve_list_and_shutdown() {
    let date = Utc.with_ymd_and_hms(2025, 10, 3, 19, 2, 6).unwrap();
    let store = Arc::new(ApplicationStore::seeded(vec![
        Application::new(date, "Samsara", "Backend Engineer", Status::Pending),
        Application::new(date, "Affinity", "", Status::Reject),
    ]));

    let port = free_port();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(start_server(
        ServerConfig::new("127.0.0.1", port),
        Arc::clone(&store),
        async move {
            let _ = stop_rx.await;
        },
    ));

    let mut client = connect(port).await;

    let health = client
        .health_check(HealthCheckRequest {})
        .await
        .unwrap()
        .into_inner();
    assert_eq!(health.application_count, 2);

    let rejected = client
        .list_applications(ListApplicationsRequest {
            status: Some(StatusType::Reject as i32),
            ..Default::default()
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(rejected.applications.len(), 1);
    assert_eq!(rejected.applications[0].company, "Affinity");

    let missing = client
        .set_interviews(SetInterviewsRequest {
            date: Some(timestamp_to_proto(date)),
            company: "Nobody".to_string(),
            interviews: vec![],
        })
        .await
        .unwrap_err();
    assert_eq!(missing.code(), tonic::Code::NotFound);

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
