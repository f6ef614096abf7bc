use anyhow::Context;
use colored::Colorize;
use serde_json::json;

use trellis_content::{ContentFixture, ContentSource};
use trellis_present::{MapConfigStore, ThemeConfigStore};
use trellis_resolve::HANDLE_MOUNT;
use trellis_server::{ServerConfig, TrellisServer};
use trellis_types::Handle;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let json = matches!(cli.format, OutputFormat::Json);
    match cli.command {
        Command::Serve(args) => cmd_serve(config, args),
        Command::Resolve(args) => cmd_resolve(config, args, json),
        Command::Crumbs(args) => cmd_crumbs(config, args, json),
        Command::Theme(args) => cmd_theme(config, args, json),
        Command::CheckConfig(_) => cmd_check_config(config, json),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(fixture) = &cli.fixture {
        config.content_fixture = Some(fixture.clone());
    }
    Ok(config)
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind.parse().with_context(|| format!("invalid bind address {bind}"))?;
    }
    let server = TrellisServer::from_config(config)?;
    println!("Trellis server on {}", server.config().bind_addr.to_string().bold());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_resolve(config: ServerConfig, args: ResolveArgs, json: bool) -> anyhow::Result<()> {
    let server = TrellisServer::from_config(config)?;
    let dispatch = server.state().dispatcher().dispatch(&args.path)?;
    let route = &dispatch.route;
    if json {
        return print_json(&json!({
            "path": args.path,
            "handle": dispatch.node.handle(),
            "name": dispatch.node.name(),
            "route": route,
            "target": route.path(),
        }));
    }
    println!(
        "{} {} → {}",
        "✓".green().bold(),
        args.path.bold(),
        route.path().cyan()
    );
    println!("  Kind: {}", route.kind().to_string().yellow());
    println!("  Name: {}", dispatch.node.name());
    println!("  ID: {}", route.id().to_string().dimmed());
    Ok(())
}

fn request_path(handle: &Handle, residual: &str) -> String {
    let residual = residual.trim_start_matches('/');
    if residual.is_empty() {
        format!("{HANDLE_MOUNT}{handle}")
    } else {
        format!("{HANDLE_MOUNT}{handle}/{residual}")
    }
}

fn cmd_crumbs(config: ServerConfig, args: CrumbsArgs, json: bool) -> anyhow::Result<()> {
    let server = TrellisServer::from_config(config)?;
    let state = server.state();
    let handle: Handle = args.handle.parse()?;
    let node = state.dispatcher().resolve(&handle)?;
    let crumbs = state
        .pages()
        .breadcrumbs(Some(&node), &request_path(&handle, &args.residual));

    if json {
        return print_json(&json!({ "handle": handle, "breadcrumbs": crumbs }));
    }
    for (depth, crumb) in crumbs.iter().enumerate() {
        println!("{}{} {}", "  ".repeat(depth), crumb.label.bold(), crumb.path.dimmed());
    }
    Ok(())
}

fn cmd_theme(config: ServerConfig, args: ThemeArgs, json: bool) -> anyhow::Result<()> {
    let server = TrellisServer::from_config(config)?;
    let state = server.state();
    let handle: Handle = args.handle.parse()?;
    let node = state.dispatcher().resolve(&handle)?;
    let pages = state.pages();
    let crumbs = pages.breadcrumbs(Some(&node), &request_path(&handle, &args.residual));
    let theme = pages.theme(&crumbs);
    let keys: Vec<String> = crumbs
        .iter()
        .filter_map(|crumb| state.themes().config_key(&crumb.path))
        .collect();

    if json {
        return print_json(&json!({ "handle": handle, "theme": theme, "keys": keys }));
    }
    println!("{} {}", handle.to_string().bold(), theme.green().bold());
    for key in &keys {
        match state.themes().config().get(key) {
            Some(v) if !v.is_empty() => println!("  {} = {}", key, v.yellow()),
            _ => println!("  {} {}", key.dimmed(), "(not set)".dimmed()),
        }
    }
    Ok(())
}

/// The default-theme key itself plus every `{setting}.`-prefixed override.
fn theme_key_count(store: &MapConfigStore, setting: &str) -> usize {
    let overrides = format!("{setting}.");
    store
        .entries_with_prefix(setting)
        .filter(|(key, _)| *key == setting || key.starts_with(&overrides))
        .count()
}

fn cmd_check_config(config: ServerConfig, json: bool) -> anyhow::Result<()> {
    let theme_keys = theme_key_count(&config.theme_store(), &config.theme_setting);
    let fixture = match &config.content_fixture {
        Some(path) => Some(
            ContentFixture::load(path).with_context(|| format!("loading fixture {}", path.display()))?,
        ),
        None => None,
    };
    let counts = fixture
        .as_ref()
        .map(|f| (f.community.len(), f.collection.len(), f.item.len()));
    let top = match fixture {
        Some(fixture) => fixture.into_source()?.top_communities()?.len(),
        None => 0,
    };

    if json {
        let (communities, collections, items) = counts.unwrap_or_default();
        return print_json(&json!({
            "bind_addr": config.bind_addr.to_string(),
            "application_name": config.application_name,
            "theme_keys": theme_keys,
            "fixture": config.content_fixture,
            "communities": communities,
            "collections": collections,
            "items": items,
            "top_communities": top,
        }));
    }

    println!("{} Configuration OK", "✓".green().bold());
    println!("  Application: {}", config.application_name.bold());
    println!("  Bind: {}", config.bind_addr);
    println!("  Theme keys: {}", theme_keys);
    match (&config.content_fixture, counts) {
        (Some(path), Some((communities, collections, items))) => {
            println!("  Fixture: {}", path.display().to_string().cyan());
            println!(
                "    {} communities ({} top-level), {} collections, {} items",
                communities, top, collections, items
            );
        }
        _ => println!("  Fixture: {}", "none (empty repository)".yellow()),
    }
    Ok(())
}
