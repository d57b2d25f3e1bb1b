use super::*;

#[test]
fn defaults_run_a_single_request() -> AppResult<()> {
    let args = parse_test_args(["benchpro", "-u", "http://localhost"])?;
    if args.requests.get() != 1 || args.users.get() != 1 || args.duration.is_some() {
        return Err(AppError::validation("Unexpected load defaults"));
    }
    if args.method != HttpMethod::Get || args.output_format != OutputFormat::Text {
        return Err(AppError::validation("Unexpected method/output defaults"));
    }
    if args.timeout != Duration::from_secs(10) || args.pacing != Duration::from_millis(10) {
        return Err(AppError::validation(format!(
            "Unexpected timing defaults: {:?}/{:?}",
            args.timeout, args.pacing
        )));
    }
    if args.notify_every != 5 || args.pretty || args.verbose {
        return Err(AppError::validation("Unexpected flag defaults"));
    }
    Ok(())
}

#[test]
fn parse_load_options() -> AppResult<()> {
    let args = parse_test_args([
        "benchpro",
        "-u",
        "http://localhost",
        "-X",
        "PATCH",
        "-n",
        "200",
        "-c",
        "8",
        "-t",
        "30",
        "--timeout",
        "2s",
        "--pacing",
        "50ms",
        "--notify-every",
        "0",
        "--output-format",
        "json",
    ])?;
    if args.method != HttpMethod::Patch {
        return Err(AppError::validation("Expected PATCH"));
    }
    if args.requests.get() != 200 || args.users.get() != 8 {
        return Err(AppError::validation("Unexpected request/user counts"));
    }
    if args.duration.map(PositiveU64::get) != Some(30) {
        return Err(AppError::validation("Unexpected duration"));
    }
    if args.timeout != Duration::from_secs(2) || args.pacing != Duration::from_millis(50) {
        return Err(AppError::validation("Unexpected timing options"));
    }
    if args.notify_every != 0 || args.output_format != OutputFormat::Json {
        return Err(AppError::validation("Unexpected output options"));
    }
    Ok(())
}

#[test]
fn parse_body_and_auth_options() -> AppResult<()> {
    let args = parse_test_args([
        "benchpro",
        "-u",
        "http://localhost",
        "-d",
        "{\"a\":1}",
        "-T",
        "application/json",
        "--user",
        "alice",
        "--secret",
        "s3cret",
        "--pretty",
        "--export-json",
        "out.json",
        "--export-csv",
        "out.csv",
    ])?;
    if args.data != "{\"a\":1}" || args.content_type.as_deref() != Some("application/json") {
        return Err(AppError::validation("Unexpected body options"));
    }
    if args.user.as_deref() != Some("alice") || args.secret.as_deref() != Some("s3cret") {
        return Err(AppError::validation("Unexpected auth options"));
    }
    if !args.pretty
        || args.export_json.as_deref() != Some("out.json")
        || args.export_csv.as_deref() != Some("out.csv")
    {
        return Err(AppError::validation("Unexpected output options"));
    }
    Ok(())
}

#[test]
fn data_and_data_file_conflict() -> AppResult<()> {
    let result = parse_test_args([
        "benchpro",
        "-u",
        "http://localhost",
        "-d",
        "inline",
        "-D",
        "body.json",
    ]);
    if result.is_ok() {
        return Err(AppError::validation("Expected conflict between --data and --data-file"));
    }
    Ok(())
}

#[test]
fn zero_requests_are_rejected() -> AppResult<()> {
    for flag in ["-n", "-c", "-t"] {
        if parse_test_args(["benchpro", "-u", "http://localhost", flag, "0"]).is_ok() {
            return Err(AppError::validation(format!("Expected {} 0 to be rejected", flag)));
        }
    }
    Ok(())
}
