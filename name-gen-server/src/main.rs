use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{error, info};

use serde::Deserialize;
use name_gen_core::Error;
use name_gen_core::model::gender::Gender;
use name_gen_core::model::generation_input::{GenerationInput, DEFAULT_MAX_ATTEMPTS};
use name_gen_core::model::markov_model::MarkovModel;
use name_gen_core::model::name_source::FileNameSource;

/// Upper bound of the `count` query parameter.
const MAX_COUNT: usize = 100;

/// HTTP front-end of the name generator
#[derive(Parser, Debug, Clone)]
#[command(name = "name-gen-server")]
#[command(author, version, about, long_about = None)]
struct Config {
	/// Folder holding `male.txt` and `female.txt`
	#[arg(long, env = "NAME_GEN_DATA", default_value = "./data")]
	data: PathBuf,

	/// Address to bind
	#[arg(long, env = "NAME_GEN_HOST", default_value = "127.0.0.1")]
	host: String,

	/// Port to bind
	#[arg(long, env = "NAME_GEN_PORT", default_value_t = 5000)]
	port: u16,

	/// Candidates to try per name before answering with an error
	#[arg(long, env = "NAME_GEN_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
	max_attempts: usize,
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	min_length: Option<usize>,
	max_length: Option<usize>,
	count: Option<usize>,
}

/// Query parameters for the `/v1/initialize` endpoint
#[derive(Deserialize)]
struct InitializeParams {
	gender: Option<Gender>,
	order: Option<usize>,
}

/// Query parameters for the `/v1/reseed` endpoint
#[derive(Deserialize)]
struct ReseedParams {
	seed: Option<u64>,
}

struct SharedData {
	source: FileNameSource,
	max_attempts: usize,
	model: Option<MarkovModel>,
}

impl GenerateParams {
	/// Builds the generation input, `count` clamped to `1..=MAX_COUNT`.
	fn input(&self, max_attempts: usize) -> (GenerationInput, usize) {
		let input = GenerationInput::new(self.min_length.unwrap_or(3), self.max_length.unwrap_or(10))
			.with_max_attempts(max_attempts.max(1));
		let count = self.count.unwrap_or(1).clamp(1, MAX_COUNT);
		(input, count)
	}
}

/// Outcome of a generation run, built off the async workers.
enum Generated {
	Names(Vec<String>),
	NoModel,
	Failed(Error),
	LockFailed,
}

#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let shared = data.into_inner();
	let params = query.into_inner();

	// Sampling is CPU bound and holds the lock, keep it off the event loop
	let generated = web::block(move || {
		let mut shared_data = match shared.lock() {
			Ok(m) => m,
			Err(_) => return Generated::LockFailed,
		};

		let (input, count) = params.input(shared_data.max_attempts);
		match shared_data.model.as_mut() {
			Some(model) => match model.generate_names(&input, count) {
				Ok(names) => Generated::Names(names),
				Err(e) => Generated::Failed(e),
			},
			None => Generated::NoModel,
		}
	})
	.await;

	match generated {
		Ok(Generated::Names(names)) => HttpResponse::Ok().body(names.join("\n")),
		Ok(Generated::NoModel) => HttpResponse::Conflict().body("No model loaded, call /v1/initialize first"),
		Ok(Generated::Failed(e @ Error::RetryExhausted { .. })) => HttpResponse::UnprocessableEntity().body(e.to_string()),
		Ok(Generated::Failed(e)) => HttpResponse::InternalServerError().body(e.to_string()),
		Ok(Generated::LockFailed) => HttpResponse::InternalServerError().body("Model lock failed"),
		Err(e) => {
			error!("generation task failed: {e}");
			HttpResponse::InternalServerError().body("Generation failed")
		}
	}
}

#[get("/v1/genders")]
async fn get_genders(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.source.available() {
		Ok(genders) => HttpResponse::Ok().body(
			genders.iter().map(Gender::to_string).collect::<Vec<_>>().join("\n"),
		),
		Err(e) => {
			error!("failed to list corpus files: {e}");
			HttpResponse::InternalServerError().body("Failed to list genders")
		}
	}
}

#[get("/v1/model")]
async fn get_model(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match &shared_data.model {
		Some(model) => HttpResponse::Ok().body(format!(
			"gender={}\norder={}\nnames={}\ncontexts={}",
			model.gender(),
			model.order(),
			model.corpus_len(),
			model.table().len()
		)),
		None => HttpResponse::NotFound().body("No model loaded"),
	}
}

#[put("/v1/initialize")]
async fn put_initialize(data: web::Data<Mutex<SharedData>>, query: web::Query<InitializeParams>) -> impl Responder {
	let gender = match query.gender {
		Some(gender) => gender,
		None => return HttpResponse::BadRequest().body("Missing gender"),
	};
	let order = query.order.unwrap_or(3);

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match MarkovModel::initialize(&shared_data.source, gender, order) {
		Ok(model) => {
			info!("model initialized: {gender}, order {order}");
			shared_data.model = Some(model);
			HttpResponse::Ok().body("Model initialized successfully")
		}
		Err(e @ Error::InvalidParameter(_)) => HttpResponse::BadRequest().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to initialize model: {e}")),
	}
}

#[put("/v1/reseed")]
async fn put_reseed(data: web::Data<Mutex<SharedData>>, query: web::Query<ReseedParams>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model.as_mut() {
		Some(model) => {
			match query.seed {
				Some(seed) => model.reseed_from(seed),
				None => model.reseed(),
			}
			HttpResponse::Ok().body("Model reseeded")
		}
		None => HttpResponse::Conflict().body("No model loaded, call /v1/initialize first"),
	}
}

/// Main entry point for the server.
///
/// Starts without a model; clients call `/v1/initialize` to train one,
/// then `/v1/generate` as many times as needed. The model is shared
/// between workers behind a `Mutex`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = Config::parse();
	let shared_data = SharedData {
		source: FileNameSource::new(&config.data),
		max_attempts: config.max_attempts,
		model: None,
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	info!("serving names from {} on {}:{}", config.data.display(), config.host, config.port);
	HttpServer::new(move || {
		let cors = Cors::default()
			.allow_any_origin()
			.allowed_methods(vec!["GET", "PUT"]);

		App::new()
			.wrap(cors)
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_genders)
			.service(get_model)
			.service(put_initialize)
			.service(put_reseed)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
