//! Basic example reporting one result to a slick server.
//!
//! Run with:
//! ```
//! SLICK_URL=http://localhost:8080 cargo run --example basic
//! ```

use chrono::Utc;
use slickqa::models::{Project, ResultStatus, RunStatus, TestResult, Testcase, Testrun};
use slickqa::queries::TestcaseQuery;
use slickqa::{Attachable, FindOneMode, ResultHandle, SlickConnection};

#[tokio::main]
async fn main() -> slickqa::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create connection from environment variables
    println!("Connecting to slick...");
    let slick = SlickConnection::from_env()?;
    println!("Connected to: {}", slick.url());

    let version = slick.version().get().await?;
    println!(
        "Server: {} {}",
        version.product_name.as_deref().unwrap_or("slick"),
        version.version_string.as_deref().unwrap_or("unknown")
    );

    // Find or create the project
    println!("\n--- Project ---");
    let project = match slick.projects().find_by_name("Example Project").await {
        Ok(project) => project,
        Err(_) => slick.projects().create(&Project::named("Example Project")).await?,
    };
    println!("Project: {:?} ({:?})", project.name, project.id);

    // Find or create the testcase
    println!("\n--- Testcase ---");
    let query = TestcaseQuery {
        projectid: project.id.clone(),
        name: Some("Example passes".to_string()),
        ..Default::default()
    };
    let testcase = match slick.testcases().find_one(&query, FindOneMode::First).await? {
        Some(testcase) => testcase,
        None => {
            let testcase = Testcase {
                name: query.name.clone(),
                automated: Some(true),
                project: Some(project.create_reference()),
                ..Default::default()
            };
            slick.testcases().create(&testcase).await?
        }
    };
    println!("Testcase: {:?}", testcase.id);

    // Start a testrun
    println!("\n--- Testrun ---");
    let testrun = slick
        .testruns()
        .create(&Testrun {
            name: Some(format!("Example run {}", Utc::now().format("%Y-%m-%d %H:%M"))),
            project: Some(project.create_reference()),
            state: Some(RunStatus::Running),
            ..Default::default()
        })
        .await?;
    println!("Testrun: {:?}", testrun.id);

    // Report a result and attach a log
    println!("\n--- Result ---");
    let result = slick
        .results()
        .create(&TestResult {
            testrun: Some(testrun.create_reference()),
            testcase: Some(testcase.create_reference()),
            project: Some(project.create_reference()),
            status: Some(ResultStatus::Pass),
            runstatus: Some(RunStatus::Finished),
            recorded: Some(Utc::now()),
            ..Default::default()
        })
        .await?;

    let mut handle = ResultHandle::new(result, slick.clone());
    handle.add_log_entry("example finished", "INFO", "demos.basic");
    handle
        .add_link("Slick", slick.url().trim_end_matches("/api"))
        .await?;
    println!("Result: {:?} {:?}", handle.result.id, handle.result.status);

    Ok(())
}
