//! Command dispatch for the intlx CLI.
//!
//! All inputs are collected and validated before any file is touched, so an
//! aborted extraction never leaves a partial write behind.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;

use super::args::{Arguments, Command, ExtractCommand, InitCommand};
use super::exit_status::ExitStatus;
use crate::config::{self, CONFIG_FILE_NAME, Config};
use crate::extract::{ExtractionRequest, ReferenceKind, extract};

const SUCCESS_MARK: &str = "✓";

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(cmd)) => run_extract(cmd),
        Some(Command::Init(cmd)) => init(cmd),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}

fn init(cmd: InitCommand) -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    let config = Config {
        locale_file: cmd.locale_file,
        ..Default::default()
    };
    config::save_config(config_path, &config)?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    Ok(ExitStatus::Success)
}

fn run_extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let start_dir = match cmd.file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().context("Failed to resolve the current directory")?,
    };
    let loaded = config::load_config(&start_dir)?;

    let Some(locale_file) = cmd.locale_file.clone().or_else(|| loaded.locale_file()) else {
        eprintln!(
            "Error: no locale dictionary configured; pass --locale-file or set \"localeFile\" in {}",
            CONFIG_FILE_NAME
        );
        return Ok(ExitStatus::Failure);
    };

    // Remember a newly supplied dictionary path, mirroring the original
    // choose-once flow. Stored absolute (against the cwd the flag was
    // relative to), so later runs resolve to the same file no matter which
    // directory they start from.
    if loaded.config.locale_file.is_none() && cmd.locale_file.is_some() {
        let cwd = std::env::current_dir().context("Failed to resolve the current directory")?;
        let config_path = loaded
            .path
            .clone()
            .unwrap_or_else(|| cwd.join(CONFIG_FILE_NAME));
        let config = Config {
            locale_file: Some(cwd.join(&locale_file)),
            ..loaded.config.clone()
        };
        config::save_config(&config_path, &config)?;
    }

    let mut source_text: Option<String> = None;
    let mut span: Option<(usize, usize)> = None;
    let selected_text = if let Some(text) = cmd.text.clone() {
        text
    } else if let Some(range) = &cmd.range {
        let content = fs::read_to_string(&cmd.file)
            .with_context(|| format!("Failed to read source file: {}", cmd.file.display()))?;
        let (start, end) = parse_range(range)?;
        if end > content.len() || !content.is_char_boundary(start) || !content.is_char_boundary(end)
        {
            bail!(
                "range {}..{} is not a valid character range of {}",
                start,
                end,
                cmd.file.display()
            );
        }
        let text = content[start..end].to_string();
        source_text = Some(content);
        span = Some((start, end));
        text
    } else {
        String::new()
    };

    let reference = if cmd.tagged {
        ReferenceKind::Tagged
    } else {
        ReferenceKind::Plain
    };
    let request = ExtractionRequest {
        selected_text: &selected_text,
        source_file: &cmd.file,
        variable_name: &cmd.name,
        message_id: &cmd.id,
        reference,
        locale_file: &locale_file,
        messages_extension: &loaded.config.messages_extension,
    };

    // Nothing to extract is a silent no-op, not an error.
    let Some(outcome) = extract(&request)? else {
        return Ok(ExitStatus::Success);
    };

    if cmd.write {
        if let (Some(content), Some((start, end))) = (source_text, span) {
            let rewritten = format!(
                "{}{}{}",
                &content[..start],
                outcome.replacement,
                &content[end..]
            );
            fs::write(&cmd.file, rewritten)
                .with_context(|| format!("Failed to write source file: {}", cmd.file.display()))?;
        }
    }

    println!("{} {}", SUCCESS_MARK.green(), reference.notice().green());
    println!("replacement: {}", outcome.replacement);
    println!("cursor-offset: {}", outcome.cursor_offset);
    if cmd.verbose {
        println!(
            "definitions: {}{}",
            outcome.definitions_path.display(),
            if outcome.definitions_created {
                " (created)"
            } else {
                ""
            }
        );
        println!(
            "dictionary: {} ({} {})",
            locale_file.display(),
            outcome.dictionary_action.as_str(),
            cmd.id
        );
    }

    Ok(ExitStatus::Success)
}

/// Parse a `START..END` byte range.
fn parse_range(range: &str) -> Result<(usize, usize)> {
    let Some((start, end)) = range.split_once("..") else {
        bail!("invalid range `{}`: expected START..END", range);
    };
    let start: usize = start
        .trim()
        .parse()
        .with_context(|| format!("invalid range start in `{}`", range))?;
    let end: usize = end
        .trim()
        .parse()
        .with_context(|| format!("invalid range end in `{}`", range))?;
    if start > end {
        bail!("invalid range `{}`: start is past end", range);
    }
    Ok((start, end))
}
