//! Roles command: inspect role families and templates.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use resume_ats_core::roles::{self, RoleTemplateProvider};
use resume_ats_core::{Config, RoleTemplate};

/// Arguments for the `roles` subcommand.
#[derive(Args, Debug, Default)]
pub struct RolesArgs {
    /// Show the template for this role family.
    #[arg(long, value_name = "FAMILY")]
    pub family: Option<String>,

    /// Resolve a job title to its role family and show that template.
    #[arg(long, value_name = "TITLE", conflicts_with = "family")]
    pub resolve: Option<String>,
}

#[derive(Serialize)]
struct FamilyList {
    families: Vec<FamilyEntry>,
}

#[derive(Serialize)]
struct FamilyEntry {
    name: String,
    configured: bool,
}

#[derive(Serialize)]
struct TemplateView {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    role_family: String,
    #[serde(flatten)]
    template: RoleTemplate,
}

/// List role families, or show one family's template.
#[instrument(name = "cmd_roles", skip_all)]
pub async fn cmd_roles(args: RolesArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(family = ?args.family, resolve = ?args.resolve, "executing roles command");
    let provider = config.role_template_provider();

    let (title, family) = match (args.resolve, args.family) {
        (Some(title), _) => {
            let family = roles::resolve_with_provider(&provider, &roles::normalize_job_title(&title));
            (Some(title), family)
        }
        (None, Some(family)) => (None, family),
        (None, None) => return list_families(&provider, global_json),
    };

    let resolved = roles::load_role_template(&provider, &family).await;
    let view = TemplateView {
        title,
        role_family: resolved.role_family,
        template: resolved.template,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if let Some(ref title) = view.title {
        println!("{} → {}", title, view.role_family.cyan().bold());
    } else {
        println!("{}", view.role_family.cyan().bold());
    }
    if view.role_family != family {
        println!("  {}", format!("no template for '{family}', showing fallback").yellow());
    }
    print_skills("Must have", &view.template.must_have);
    print_skills("Nice to have", &view.template.nice_to_have);
    print_skills("Tools", &view.template.tools);
    Ok(())
}

fn list_families(
    provider: &resume_ats_core::ConfiguredRoleTemplates,
    global_json: bool,
) -> anyhow::Result<()> {
    let families: Vec<FamilyEntry> = provider
        .families()
        .into_iter()
        .map(|name| FamilyEntry {
            configured: provider.is_overridden(&name),
            name,
        })
        .collect();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&FamilyList { families })?);
        return Ok(());
    }

    for entry in &families {
        if entry.configured {
            println!("{} {}", entry.name, "(configured)".dimmed());
        } else {
            println!("{}", entry.name);
        }
    }
    Ok(())
}

fn print_skills(label: &str, skills: &[String]) {
    if skills.is_empty() {
        println!("  {}: {}", label.dimmed(), "(none)".dimmed());
    } else {
        println!("  {}: {}", label.dimmed(), skills.join(", "));
    }
}
