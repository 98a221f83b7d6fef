use crate::domain::models::JsonOut;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: &T,
    lines: impl Fn(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    print_with_status(json, true, data, lines)
}

/// Like `print_one`, but the JSON envelope carries `ok` so it agrees with the
/// process exit status.
pub fn print_with_status<T: Serialize>(
    json: bool,
    ok: bool,
    data: &T,
    lines: impl Fn(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok, data })?
        );
    } else {
        for line in lines(data) {
            println!("{}", line);
        }
    }
    Ok(())
}
