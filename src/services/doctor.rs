use crate::domain::models::{CheckItem, DoctorReport, RunSettings};
use crate::services::builder::parse_build_command;
use crate::services::fixtures::discover_fixtures;

const ACCEPTABLE: &[&str] = &["ok", "not_provided", "not_created"];

fn check(name: &str, status: &str) -> CheckItem {
    CheckItem {
        name: name.to_string(),
        status: status.to_string(),
    }
}

fn exists_status(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "missing"
    }
}

pub fn doctor(settings: &RunSettings) -> DoctorReport {
    let mut checks = vec![check(
        "fixtures_dir",
        exists_status(settings.fixtures_dir.is_dir()),
    )];

    let fixtures_status = if settings.fixtures_dir.is_dir() {
        match discover_fixtures(&settings.fixtures_dir, &settings.pattern) {
            Ok(found) if found.is_empty() => "missing",
            Ok(_) => "ok",
            Err(_) => "invalid",
        }
    } else {
        "missing"
    };
    checks.push(check("matching_fixtures", fixtures_status));

    checks.push(check(
        "font",
        match &settings.font {
            Some(f) => exists_status(f.is_file()),
            None => "not_provided",
        },
    ));

    checks.push(check(
        "output_dir",
        if settings.output_dir.is_dir() {
            "ok"
        } else if settings.output_dir.exists() {
            "invalid"
        } else {
            "not_created"
        },
    ));

    checks.push(check(
        "renderer_binary",
        exists_status(settings.binary.is_file()),
    ));

    let build_status = match parse_build_command(&settings.build_command) {
        Ok((program, _)) => exists_status(
            std::process::Command::new(program)
                .arg("--version")
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false),
        ),
        Err(_) => "invalid",
    };
    checks.push(check("build_program", build_status));

    let overall = if checks
        .iter()
        .all(|c| ACCEPTABLE.contains(&c.status.as_str()))
    {
        "ok"
    } else {
        "needs_attention"
    }
    .to_string();

    DoctorReport { overall, checks }
}
