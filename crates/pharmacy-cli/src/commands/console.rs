//! Menu and page commands.

use clap::Args;

use crate::output::{self, OutputFormat};
use pharmacy_auth::navigation::MenuNode;
use pharmacy_client::api::HttpAuthApi;
use pharmacy_client::console::{Page, PageContent};
use pharmacy_client::views::GuardedView;
use pharmacy_client::Navigator;
use pharmacy_core::config::AppConfig;
use pharmacy_core::error::AppError;

/// Arguments for the menu command
#[derive(Debug, Args)]
pub struct MenuArgs {
    /// Location to highlight
    #[arg(short, long, default_value = "/admin")]
    pub location: String,

    /// Ask the server to build the menu instead of building it locally
    #[arg(long)]
    pub remote: bool,
}

/// Arguments for the open command
#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Console path, e.g. /admin/catalog/products
    pub path: String,
}

/// Print the menu visible to the signed-in user
pub async fn menu(args: &MenuArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let (items, active) = if args.remote {
        let console = pharmacy_client::Console::connect(&config.client)?;
        let token = console
            .session()
            .token()
            .ok_or_else(|| AppError::authentication("Not signed in"))?;
        let nav = HttpAuthApi::new(&config.client)?
            .navigation(&token, &args.location)
            .await?;
        (nav.items, nav.active)
    } else {
        let console = super::resolved_console(config).await?;
        if console.session().user().is_none() {
            return Err(AppError::authentication("Not signed in"));
        }
        console.navigator().push(&args.location);
        console.menu()
    };

    match format {
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "items": items,
            "active": active,
        })),
        OutputFormat::Table => print_tree(&items, &active, 0),
    }
    Ok(())
}

fn print_tree(nodes: &[MenuNode], active: &[String], depth: usize) {
    for node in nodes {
        let marker = if active.iter().any(|k| *k == node.key) { "▸" } else { " " };
        println!(
            "{marker} {:indent$}{:<20} {}",
            "",
            node.label,
            node.route_prefix,
            indent = depth * 2
        );
        print_tree(node.child_nodes(), active, depth + 1);
    }
}

/// Open a location and show what the guard renders
pub async fn open(args: &OpenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let console = super::resolved_console(config).await?;
    let page = console.open(&args.path);

    if format == OutputFormat::Json {
        output::print_json(&page);
        return Ok(());
    }

    match page {
        Page::Public { title } => output::print_success(&format!("{title} (public)")),
        Page::NotFound { path } => output::print_warning(&format!("No page at {path}")),
        Page::Guarded { view } => print_view(view),
    }
    Ok(())
}

fn print_view(view: GuardedView<PageContent>) {
    match view {
        GuardedView::Loading => output::print_warning("Still resolving the session"),
        GuardedView::Redirected { to } => {
            output::print_warning(&format!("Not signed in; redirected to {to}"));
        }
        GuardedView::Forbidden(forbidden) => {
            output::print_error(&format!("{}: {}", forbidden.title, forbidden.message));
            output::print_kv("Requires", &forbidden.requirement);
        }
        GuardedView::Fallback(page) | GuardedView::Content(page) => {
            output::print_success(&page.title);
            output::print_kv("Path", &page.path);
            output::print_kv("User", &format!("{} ({})", page.user.name, page.user.role));
            output::print_kv("Active", &page.active.join(" › "));
        }
    }
}
