use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::Value;

#[derive(Clone)]
struct StubState {
	received:       Arc<Mutex<Vec<Value>>>,
	payment_status: u16,
	health_body:    Option<String>,
}

async fn payments_stub(
	state: web::Data<StubState>,
	body: web::Json<Value>,
) -> HttpResponse {
	state.received.lock().unwrap().push(body.into_inner());
	HttpResponse::build(
		StatusCode::from_u16(state.payment_status).unwrap(),
	)
	.finish()
}

async fn health_stub(state: web::Data<StubState>) -> HttpResponse {
	match &state.health_body {
		Some(body) => HttpResponse::Ok()
			.content_type("application/json")
			.body(body.clone()),
		None => HttpResponse::InternalServerError().finish(),
	}
}

/// Spawns an in-process stand-in for a downstream processor on an
/// ephemeral port. Returns its base url and the bodies it received on
/// `POST /payments`.
pub async fn spawn_processor(
	payment_status: u16,
	health_body: Option<&str>,
) -> (String, Arc<Mutex<Vec<Value>>>) {
	let received = Arc::new(Mutex::new(Vec::new()));
	let state = StubState {
		received:       received.clone(),
		payment_status,
		health_body:    health_body.map(str::to_string),
	};

	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let port = listener.local_addr().unwrap().port();

	let server = HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(state.clone()))
			.route("/payments", web::post().to(payments_stub))
			.route("/payments/service-health", web::get().to(health_stub))
	})
	.workers(1)
	.disable_signals()
	.listen(listener)
	.unwrap()
	.run();
	tokio::spawn(server);

	(format!("http://127.0.0.1:{port}"), received)
}

/// An address nothing listens on.
pub fn unreachable_url() -> String {
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let port = listener.local_addr().unwrap().port();
	drop(listener);
	format!("http://127.0.0.1:{port}")
}
