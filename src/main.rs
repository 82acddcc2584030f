use dotenvy::dotenv;

use studyport::logging::init_tracing;
use studyport::router::init_router;
use studyport::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // Admin accounts are provisioned from the command line, never via the API
    if args.get(1).map(String::as_str) == Some("create-admin") {
        create_admin_command(&args).await;
        return;
    }

    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await.unwrap();
    println!("🚀 Studyport API listening on http://localhost:{port}");
    println!("📚 Interactive docs at /swagger-ui and /scalar");
    axum::serve(listener, app).await.unwrap();
}

async fn create_admin_command(args: &[String]) {
    let [_, _, first_name, last_name, email, password] = args else {
        eprintln!(
            "Usage: {} create-admin <first_name> <last_name> <email> <password>",
            args[0]
        );
        std::process::exit(1);
    };

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match studyport::cli::create_admin(&pool, first_name, last_name, email, password).await {
        Ok(id) => println!("✅ Admin account created: {email} ({id})"),
        Err(e) => {
            eprintln!("❌ Could not create admin account: {}", e.message);
            std::process::exit(1);
        }
    }
}
