use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use log::info;
use tokio::sync::watch;

use crate::adapters::web::payments_handler::payments;
use crate::adapters::web::payments_purge_handler::payments_purge;
use crate::adapters::web::payments_summary_handler::payments_summary;
use crate::domain::ledger::CompletionLedger;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::http::processor_client::ProcessorClient;
use crate::infrastructure::persistence::redis_payment_repository::RedisPaymentRepository;
use crate::infrastructure::queue::in_memory_payment_queue::InMemoryPaymentQueue;
use crate::infrastructure::routing::routing_state::RoutingState;
use crate::infrastructure::workers::health_monitor_worker::health_monitor_worker;
use crate::infrastructure::workers::payment_dispatch_worker::payment_dispatch_worker;
use crate::use_cases::create_payment::CreatePaymentUseCase;
use crate::use_cases::get_payment_summary::GetPaymentSummaryUseCase;
use crate::use_cases::process_payment::ProcessPaymentUseCase;
use crate::use_cases::purge_payments::PurgePaymentsUseCase;

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod use_cases;

pub async fn run(config: Arc<Config>) -> std::io::Result<()> {
	env_logger::init();

	let redis_client = redis::Client::open(config.redis_url.clone())
		.map_err(std::io::Error::other)?;
	let payment_repo = RedisPaymentRepository::new(redis_client);

	let http_client = reqwest::Client::new();
	let routing = RoutingState::new();

	let processor_client = ProcessorClient::new(
		http_client.clone(),
		routing.clone(),
		config.default_payment_processor_url.clone(),
		config.fallback_payment_processor_url.clone(),
	)
	.map_err(std::io::Error::other)?;

	let payment_queue = InMemoryPaymentQueue::new(config.queue_capacity);
	let ledger = Arc::new(CompletionLedger::new());

	let create_payment_use_case =
		CreatePaymentUseCase::new(payment_queue.clone());
	let get_payment_summary_use_case =
		GetPaymentSummaryUseCase::new(payment_repo.clone());
	let purge_payments_use_case = PurgePaymentsUseCase::new(payment_repo.clone());
	let process_payment_use_case = ProcessPaymentUseCase::new(
		Arc::new(processor_client),
		Arc::new(payment_repo),
		ledger,
	);

	let (shutdown_tx, shutdown_rx) = watch::channel(false);

	info!("Starting health monitor...");
	tokio::spawn(health_monitor_worker(
		routing,
		http_client,
		config.default_payment_processor_url.clone(),
		config.fallback_payment_processor_url.clone(),
		shutdown_rx,
	));

	let worker_concurrency = config.worker_concurrency.max(1);
	info!("Starting {worker_concurrency} dispatch workers...");
	for _ in 0..worker_concurrency {
		tokio::spawn(payment_dispatch_worker(
			payment_queue.clone(),
			process_payment_use_case.clone(),
		));
	}

	info!("Starting server on 0.0.0.0:9999...");
	let server_keepalive = config.server_keepalive;
	let result = HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(create_payment_use_case.clone()))
			.app_data(web::Data::new(get_payment_summary_use_case.clone()))
			.app_data(web::Data::new(purge_payments_use_case.clone()))
			.service(payments)
			.service(payments_summary)
			.service(payments_purge)
	})
	.keep_alive(Duration::from_secs(server_keepalive))
	.bind(("0.0.0.0", 9999))?
	.run()
	.await;

	let _ = shutdown_tx.send(true);
	payment_queue.close();

	result
}
