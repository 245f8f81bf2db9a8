//! End-to-end demo: REST backend, authorized session, create-form flow

use fleetdesk::prelude::*;
use fleetdesk::server;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("🚗 Fleetdesk Create-Car Demo\n");

    // Start the reference backend on an ephemeral port
    let state = AppState::default();
    state.organizations.create_with_id("org-123", "Acme Motors")?;
    state.organizations.create_with_id("org-456", "Zenith Fleet")?;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    tokio::spawn(server::serve(listener, server::build_router(state)));

    // Session and client from configuration
    let mut config = AdminConfig::default_config();
    config.api.base_url = base_url;
    let context = AuthContext::User {
        user_id: "demo-user".to_string(),
        grants: config.parsed_grants()?,
    };
    let client = RestClient::from_config(&config.api)?;

    // The picker lookup the form's organization select would use
    let organizations = client.search(Some("acme")).await?;
    println!("🏢 Picker options matching 'acme':");
    for org in &organizations {
        println!("   {} ({})", org.name, org.id);
    }

    // Construct the page — the gate passes because the config grants create
    let mut form = CreateCarForm::new(&context, Some("org-123".to_string()))?;

    // First attempt: empty draft, blocked locally
    match form.submit(&client, &TracingNavigator).await {
        SubmitOutcome::Invalid => {
            println!("\n❌ Empty draft rejected before any network call:");
            for violation in form.field_errors() {
                println!("   {}: {}", violation.field, violation.message);
            }
        }
        other => println!("unexpected outcome: {:?}", other),
    }

    // Fill the form and resubmit
    form.set_specification("V6 turbo");
    form.set_make_year(Some(2024.0));
    form.set_model("GTX");
    form.set_engine("3.0L V6");

    match form.submit(&client, &TracingNavigator).await {
        SubmitOutcome::Created(car) => {
            println!("\n✅ Created car {}", car.id.as_deref().unwrap_or("?"));
            println!("   draft reset: specification = {:?}", form.draft().specification);
        }
        other => println!("unexpected outcome: {:?}", other),
    }

    // The listing view the flow navigated to
    let query = CarQuery {
        organization_id: Some("org-123".to_string()),
        ..CarQuery::default()
    };
    let cars = client.list(&query, &PageParams::default()).await?;
    println!("\n📋 Cars for org-123:");
    for car in &cars {
        let org = car
            .organization
            .as_ref()
            .map(|o| o.name.as_str())
            .unwrap_or("-");
        println!("   {} {} ({}) — {}", car.make_year, car.model, car.engine, org);
    }

    println!("\n✨ Demo completed successfully!");
    Ok(())
}
