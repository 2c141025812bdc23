//! Text rendering for tool results.
//!
//! Collections render as a count header, numbered detail blocks, a `---`
//! separator and a JSON array of the same items. Optional fields that are
//! absent are left out of both the detail block and the JSON.

use crate::models::{Inventory, JobLaunch, JobStatus, JobTemplate, Organization, Project};
use crate::services::config::AapConfig;
use crate::utils::text::plural;
use serde::Serialize;
use std::fmt::Write;

pub const NO_TEMPLATES: &str = "No job templates found in the specified project.";
pub const NO_INVENTORIES: &str = "No inventories found in the specific organization.";
pub const NO_ORGANIZATIONS: &str = "No organizations found.";
pub const NO_PROJECTS: &str = "No projects found in the specified organization.";
const NO_DESCRIPTION: &str = "No description provided";

struct Noun {
    singular: &'static str,
    plural: &'static str,
}

fn render_collection<'a, T, J, D, S>(items: &'a [T], noun: Noun, detail: D, summarize: S) -> String
where
    J: Serialize,
    D: Fn(usize, &'a T) -> String,
    S: Fn(&'a T) -> J,
{
    let details: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| detail(idx + 1, item))
        .collect();
    let summaries: Vec<J> = items.iter().map(summarize).collect();
    let json = serde_json::to_string_pretty(&summaries).unwrap_or_else(|_| "[]".to_string());

    let mut out = format!(
        "Found {} {}:\n\n",
        items.len(),
        plural(items.len(), noun.singular, noun.plural)
    );
    out.push_str(&details.join("\n"));
    out.push_str("\n\n---\n\nJSON Data:\n```json\n");
    out.push_str(&json);
    out.push_str("\n```");
    out
}

fn heading(index: usize, name: &str, id: i64) -> String {
    format!("**{}. {}** (ID: {})\n", index, name, id)
}

fn push_line(out: &mut String, label: &str, value: Option<impl std::fmt::Display>) {
    if let Some(value) = value {
        let _ = writeln!(out, "   {}: {}", label, value);
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[derive(Serialize)]
struct TemplateSummary<'a> {
    id: i64,
    name: &'a str,
    description: &'a str,
    playbook: &'a str,
    project: i64,
    survey_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    inventory: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    credential: Option<i64>,
}

pub fn format_templates(templates: &[JobTemplate]) -> String {
    if templates.is_empty() {
        return NO_TEMPLATES.to_string();
    }
    render_collection(
        templates,
        Noun {
            singular: "job template",
            plural: "job templates",
        },
        |index, template| {
            let mut out = heading(index, &template.name, template.id);
            let description = if template.description.is_empty() {
                NO_DESCRIPTION
            } else {
                template.description.as_str()
            };
            push_line(&mut out, "📋 Description", Some(description));
            push_line(&mut out, "📘 Playbook", Some(&template.playbook));
            push_line(&mut out, "📁 Project", Some(template.project));
            push_line(&mut out, "🗂️  Inventory", template.inventory);
            push_line(&mut out, "🔑 Credential", template.credential);
            push_line(
                &mut out,
                "📝 Survey Enabled",
                Some(yes_no(template.survey_enabled)),
            );
            out
        },
        |template| TemplateSummary {
            id: template.id,
            name: &template.name,
            description: &template.description,
            playbook: &template.playbook,
            project: template.project,
            survey_enabled: template.survey_enabled,
            inventory: template.inventory,
            credential: template.credential,
        },
    )
}

#[derive(Serialize)]
struct HostSummary<'a> {
    id: i64,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    enabled: bool,
}

#[derive(Serialize)]
struct InventorySummary<'a> {
    id: i64,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    hosts: Vec<HostSummary<'a>>,
}

pub fn format_inventories(inventories: &[Inventory]) -> String {
    if inventories.is_empty() {
        return NO_INVENTORIES.to_string();
    }
    render_collection(
        inventories,
        Noun {
            singular: "inventory",
            plural: "inventories",
        },
        |index, inventory| {
            let mut out = heading(index, &inventory.name, inventory.id);
            let description = inventory.description.as_deref().unwrap_or(NO_DESCRIPTION);
            push_line(&mut out, "📋 Description", Some(description));
            for (idx, host) in inventory.hosts.iter().enumerate() {
                let _ = writeln!(out, "   - Host {}: {}", idx + 1, host.name);
                if let Some(description) = host.description.as_deref() {
                    let _ = writeln!(out, "              Description : {}", description);
                }
                let _ = writeln!(out, "              Enabled     : {}", yes_no(host.enabled));
            }
            out
        },
        |inventory| InventorySummary {
            id: inventory.id,
            name: &inventory.name,
            description: inventory.description.as_deref(),
            hosts: inventory
                .hosts
                .iter()
                .map(|host| HostSummary {
                    id: host.id,
                    name: &host.name,
                    description: host.description.as_deref(),
                    enabled: host.enabled,
                })
                .collect(),
        },
    )
}

#[derive(Serialize)]
struct OrganizationSummary<'a> {
    id: i64,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

pub fn format_organizations(organizations: &[Organization]) -> String {
    if organizations.is_empty() {
        return NO_ORGANIZATIONS.to_string();
    }
    render_collection(
        organizations,
        Noun {
            singular: "organization",
            plural: "organizations",
        },
        |index, org| {
            let mut out = heading(index, &org.name, org.id);
            push_line(&mut out, "📋 Description", org.description.as_deref());
            out
        },
        |org| OrganizationSummary {
            id: org.id,
            name: &org.name,
            description: org.description.as_deref(),
        },
    )
}

#[derive(Serialize)]
struct ProjectSummary<'a> {
    id: i64,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scm_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scm_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scm_branch: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
}

pub fn format_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return NO_PROJECTS.to_string();
    }
    render_collection(
        projects,
        Noun {
            singular: "project",
            plural: "projects",
        },
        |index, project| {
            let mut out = heading(index, &project.name, project.id);
            push_line(&mut out, "📋 Description", project.description.as_deref());
            push_line(&mut out, "🏢 Organization", project.organization);
            push_line(&mut out, "🔀 SCM Type", project.scm_type.as_deref());
            push_line(&mut out, "🌐 SCM URL", project.scm_url.as_deref());
            push_line(&mut out, "🌿 SCM Branch", project.scm_branch.as_deref());
            push_line(&mut out, "📊 Status", project.status.as_deref());
            out
        },
        |project| ProjectSummary {
            id: project.id,
            name: &project.name,
            description: project.description.as_deref(),
            organization: project.organization,
            scm_type: project.scm_type.as_deref(),
            scm_url: project.scm_url.as_deref(),
            scm_branch: project.scm_branch.as_deref(),
            status: project.status.as_deref(),
        },
    )
}

pub fn format_launch(launch: &JobLaunch) -> String {
    format!(
        "Job launched successfully!\n\nJob ID: {}\nLaunch ID: {}\nURL: {}\nType: {}\n\nUse get_job_status to check the job progress.",
        launch.job, launch.id, launch.url, launch.kind
    )
}

pub fn format_job_status(status: &JobStatus) -> String {
    let summary = serde_json::to_string_pretty(&status.summary()).unwrap_or_else(|_| "{}".into());
    format!("Job Status:\n\n{}", summary)
}

pub fn format_job_output(job_id: i64, output: &str) -> String {
    format!("Job Output (Job ID: {}):\n\n```\n{}\n```", job_id, output)
}

pub fn format_connection_test(connected: bool, config: &AapConfig) -> String {
    let verdict = if connected {
        "✅ SUCCESS"
    } else {
        "❌ FAILED"
    };
    format!(
        "AAP Connection Test: {}\n\nURL: {}\nProject ID: {}\nSSL Verification: {}",
        verdict,
        config.url,
        config.project_id.as_deref().unwrap_or("(not set)"),
        config.verify_ssl
    )
}
