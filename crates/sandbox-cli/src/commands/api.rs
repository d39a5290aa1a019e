//! Commands that call the Reframe API: generate, validate, transform

use sandbox_core::api::Endpoint;
use sandbox_core::json::to_pretty;
use sandbox_core::{
    CatalogKind, CatalogStore, GenerateRequest, MessageFamily, ReframeClient, Result,
    SandboxConfig, SandboxError, TransformRequest, ValidateRequest, XmlFormatOptions,
    format_json_str, format_xml_with,
};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::{load_config, read_input};
use crate::output::{print_request, print_verdict};
use crate::{Direction, GlobalArgs, ReportFormat};

/// Generate command implementation
pub async fn generate_command(
    family: MessageFamily,
    message_type: Option<String>,
    scenario: Option<String>,
    show_request: bool,
    globals: &GlobalArgs,
) -> Result<()> {
    let config = load_config(globals)?;
    let store = CatalogStore::new(config.data_dir());
    let (message_type, scenario) =
        resolve_generation_target(&store, family, message_type, scenario)?;

    let client = ReframeClient::new(config.api_config())?;
    let message = generate_message(&client, family, &message_type, &scenario, show_request).await?;

    let message = match family {
        MessageFamily::Mx => render_xml(&message, &config.formatter_options()),
        MessageFamily::Mt => message,
    };
    println!("{}", message.trim_end());

    Ok(())
}

/// Pick the message type and scenario to generate.
///
/// Without a message type the scenario comes from the transformation
/// catalog, whose entries name their source message type: `forward`
/// scenarios start from MT, `reverse` ones from MX.
fn resolve_generation_target(
    store: &CatalogStore,
    family: MessageFamily,
    message_type: Option<String>,
    scenario: Option<String>,
) -> Result<(String, String)> {
    if let Some(message_type) = message_type {
        let kind = CatalogKind::from(family);
        let scenario = match scenario {
            Some(scenario) => {
                if store.find_scenario(kind, &message_type, &scenario).is_none() {
                    warn!(
                        "Scenario '{}' is not listed for {} in the {} catalog",
                        scenario, message_type, kind
                    );
                }
                scenario
            }
            None => store
                .first_scenario(kind, &message_type)
                .map(|s| s.value)
                .ok_or_else(|| {
                    SandboxError::invalid_input(format!(
                        "No scenarios found for {message_type}; pass --scenario"
                    ))
                })?,
        };
        return Ok((message_type, scenario));
    }

    let direction = match family {
        MessageFamily::Mt => Direction::Forward,
        MessageFamily::Mx => Direction::Reverse,
    };
    let selected = reframe_scenario(store, direction, scenario.as_deref())?;
    let source = selected.source.ok_or_else(|| {
        SandboxError::catalog_error(format!(
            "Scenario '{}' has no source message type",
            selected.value
        ))
    })?;
    Ok((source, selected.value))
}

/// Look up a transformation scenario, or the first one of a direction
fn reframe_scenario(
    store: &CatalogStore,
    direction: Direction,
    scenario: Option<&str>,
) -> Result<sandbox_core::DropdownOption> {
    let found = match scenario {
        Some(name) => store.find_scenario(CatalogKind::Reframe, direction.as_str(), name),
        None => store.first_scenario(CatalogKind::Reframe, direction.as_str()),
    };

    found.ok_or_else(|| match scenario {
        Some(name) => SandboxError::invalid_input(format!(
            "Selected scenario not found: {name} ({} transformations)",
            direction.as_str()
        )),
        None => SandboxError::invalid_input("Please select a message type and scenario"),
    })
}

async fn generate_message(
    client: &ReframeClient,
    family: MessageFamily,
    message_type: &str,
    scenario: &str,
    show_request: bool,
) -> Result<String> {
    let request = GenerateRequest::new(family, message_type, scenario);
    if show_request {
        print_request(&client.config().endpoint_url(Endpoint::Generate), &request);
    }

    info!(
        "Generating {} {} ({})",
        family.display_name(),
        message_type,
        scenario
    );
    let response = client.generate(&request).await?;

    response
        .message_text()
        .ok_or_else(|| SandboxError::Api {
            status: response.status(),
            message: "No message generated".to_string(),
        })
}

/// Validate command implementation
pub async fn validate_command(
    file: Option<PathBuf>,
    family: Option<MessageFamily>,
    canonical: bool,
    business_validation: bool,
    format: ReportFormat,
    show_request: bool,
    globals: &GlobalArgs,
) -> Result<()> {
    let config = load_config(globals)?;
    let message = read_input(file.as_deref())?;
    let family = family.unwrap_or_else(|| MessageFamily::detect(&message));
    debug!("Validating {} message", family.display_name());

    let client = ReframeClient::new(config.api_config())?;
    let request = ValidateRequest::for_family(family, message, canonical, business_validation);
    if show_request {
        print_request(&client.config().endpoint_url(Endpoint::Validate), &request);
    }

    let response = client.validate(&request).await?;
    let verdict = response.verdict();

    match format {
        ReportFormat::Human => print_verdict(&verdict),
        ReportFormat::Json => println!(
            "{}",
            to_pretty(&serde_json::json!({
                "verdict": verdict,
                "response": response.body(),
            }))
        ),
    }

    if !verdict.is_valid() {
        std::process::exit(1);
    }

    Ok(())
}

/// Arguments of the transform command
pub struct TransformArgs {
    pub file: Option<PathBuf>,
    pub scenario: Option<String>,
    pub direction: Direction,
    pub validation: bool,
    pub debug: bool,
    pub raw: bool,
    pub show_request: bool,
}

/// Transform command implementation
pub async fn transform_command(args: TransformArgs, globals: &GlobalArgs) -> Result<()> {
    let config = load_config(globals)?;
    let client = ReframeClient::new(config.api_config())?;

    let message = match (&args.file, &args.scenario) {
        (Some(file), _) => read_input(Some(file))?,
        (None, Some(scenario)) => {
            generate_transform_input(&client, &config, args.direction, scenario, args.show_request)
                .await?
        }
        (None, None) => read_input(None)?,
    };

    let request = TransformRequest {
        message,
        validation: args.validation,
        debug: args.debug,
    };
    if args.show_request {
        print_request(&client.config().endpoint_url(Endpoint::Transform), &request);
    }

    let response = client.transform(&request).await?;

    if args.raw {
        println!("{}", response.pretty());
        return Ok(());
    }

    match response.message_text() {
        Some(output) => {
            let rendered = if output.trim_start().starts_with('<') {
                render_xml(&output, &config.formatter_options())
            } else {
                format_json_str(&output)
            };
            println!("{}", rendered.trim_end());
        }
        None => {
            warn!("The API returned no transformed message, showing the full response");
            println!("{}", response.pretty());
        }
    }

    Ok(())
}

/// Generate a sample input message from a transformation scenario
async fn generate_transform_input(
    client: &ReframeClient,
    config: &SandboxConfig,
    direction: Direction,
    scenario: &str,
    show_request: bool,
) -> Result<String> {
    let store = CatalogStore::new(config.data_dir());
    let selected = reframe_scenario(&store, direction, Some(scenario))?;
    let source = selected.source.ok_or_else(|| {
        SandboxError::catalog_error(format!(
            "Scenario '{}' has no source message type",
            selected.value
        ))
    })?;

    let family = match direction {
        Direction::Forward => MessageFamily::Mt,
        Direction::Reverse => MessageFamily::Mx,
    };
    generate_message(client, family, &source, &selected.value, show_request).await
}

fn render_xml(xml: &str, options: &XmlFormatOptions) -> String {
    let outcome = format_xml_with(xml, options);
    if let Some(e) = &outcome.error {
        warn!("Showing unformatted XML: {}", e);
    }
    outcome.into_output()
}
