use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

const FIRST_ENTRY_DEFINITIONS: &str = "import { defineMessages } from 'react-intl';\n\
    \n\
    const messages = defineMessages({\n\
    \ttitle: {\n\
    \t\tid: 'home.title',\n\
    \t\tdefaultMessage: 'home.title',\n\
    \t},\n\
    });\n\
    \n\
    export default messages;\n";

const TWO_ENTRY_DEFINITIONS: &str = "import { defineMessages } from 'react-intl';\n\
    \n\
    const messages = defineMessages({\n\
    \ttitle: {\n\
    \t\tid: 'home.title',\n\
    \t\tdefaultMessage: 'home.title',\n\
    \t},\n\
    \n\
    \tsubtitle: {\n\
    \t\tid: 'home.subtitle',\n\
    \t\tdefaultMessage: 'home.subtitle',\n\
    \t},\n\
    });\n\
    \n\
    export default messages;\n";

#[test]
fn test_extract_creates_definitions_and_dictionary() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Home/index.tsx", "<h1>Welcome</h1>\n")?;

    let output = test
        .extract_command("Home/index.tsx")
        .args(["--name", "title", "--id", "home.title", "--text", "Welcome"])
        .args(["--locale-file", "locales/en.json"])
        .output()?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Message extracted."));
    assert!(stdout.contains("replacement: {messages.title}"));
    assert!(stdout.contains("cursor-offset: 10"));

    assert_eq!(
        test.read_file("Home/Home.messages.ts")?,
        FIRST_ENTRY_DEFINITIONS
    );
    assert_eq!(
        test.read_file("locales/en.json")?,
        "{\n    \"home.title\": \"Welcome\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_second_extraction_appends_with_separator() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Home/index.tsx", "<h1>Welcome</h1>\n")?;

    test.extract_command("Home/index.tsx")
        .args(["--name", "title", "--id", "home.title", "--text", "Welcome"])
        .args(["--locale-file", "locales/en.json"])
        .output()?;
    let output = test
        .extract_command("Home/index.tsx")
        .args(["--name", "subtitle", "--id", "home.subtitle"])
        .args(["--text", "Get started", "--locale-file", "locales/en.json"])
        .output()?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        test.read_file("Home/Home.messages.ts")?,
        TWO_ENTRY_DEFINITIONS
    );
    assert_eq!(
        test.read_file("locales/en.json")?,
        "{\n    \"home.title\": \"Welcome\",\n    \"home.subtitle\": \"Get started\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_tagged_extraction_prints_formatted_message_reference() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Home/index.tsx", "<h1>Welcome</h1>\n")?;

    let output = test
        .extract_command("Home/index.tsx")
        .args(["--name", "title", "--id", "home.title", "--text", "Welcome"])
        .args(["--locale-file", "locales/en.json", "--tagged"])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FormattedMessage extracted."));
    assert!(stdout.contains("replacement: <FormattedMessage {...messages.title} />"));
    assert!(stdout.contains("cursor-offset: 31"));

    Ok(())
}

#[test]
fn test_range_with_write_replaces_selection_in_source() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Home/index.tsx", "<h1>Welcome</h1>\n")?;

    let output = test
        .extract_command("Home/index.tsx")
        .args(["--name", "title", "--id", "home.title", "--range", "4..11"])
        .args(["--locale-file", "locales/en.json", "--write"])
        .output()?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        test.read_file("Home/index.tsx")?,
        "<h1>{messages.title}</h1>\n"
    );
    assert_eq!(
        test.read_file("locales/en.json")?,
        "{\n    \"home.title\": \"Welcome\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_no_selection_is_a_silent_no_op() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Home/index.tsx", "<h1>Welcome</h1>\n")?;

    let output = test
        .extract_command("Home/index.tsx")
        .args(["--name", "title", "--id", "home.title"])
        .args(["--locale-file", "locales/en.json"])
        .output()?;

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!test.root().join("Home/Home.messages.ts").exists());
    assert!(!test.root().join("locales/en.json").exists());

    Ok(())
}

#[test]
fn test_missing_locale_configuration_fails_without_writes() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Home/index.tsx", "<h1>Welcome</h1>\n")?;

    let output = test
        .extract_command("Home/index.tsx")
        .args(["--name", "title", "--id", "home.title", "--text", "Welcome"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no locale dictionary configured"));
    assert!(!test.root().join("Home/Home.messages.ts").exists());

    Ok(())
}

#[test]
fn test_locale_file_from_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlxrc.json", r#"{ "localeFile": "locales/en.json" }"#)?;
    test.write_file("Home/index.tsx", "<h1>Welcome</h1>\n")?;

    let output = test
        .extract_command("Home/index.tsx")
        .args(["--name", "title", "--id", "home.title", "--text", "Welcome"])
        .output()?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        test.read_file("locales/en.json")?,
        "{\n    \"home.title\": \"Welcome\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_locale_file_flag_is_remembered_in_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlxrc.json", "{}")?;
    test.write_file("Home/index.tsx", "<h1>Welcome</h1>\n")?;

    let output = test
        .extract_command("Home/index.tsx")
        .args(["--name", "title", "--id", "home.title", "--text", "Welcome"])
        .args(["--locale-file", "locales/en.json"])
        .output()?;

    assert!(output.status.success());
    let config = test.read_file(".intlxrc.json")?;
    assert!(config.contains("locales/en.json"), "config: {}", config);

    Ok(())
}

#[test]
fn test_remembered_locale_file_is_shared_across_directories() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlxrc.json", "{}")?;
    test.write_file("app/Home/index.tsx", "<h1>Welcome</h1>\n")?;

    // First extraction runs from app/ with a relative dictionary path.
    let output = test
        .command_from("app")
        .args(["extract", "Home/index.tsx"])
        .args(["--name", "title", "--id", "home.title", "--text", "Welcome"])
        .args(["--locale-file", "locales/en.json"])
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        test.read_file("app/locales/en.json")?,
        "{\n    \"home.title\": \"Welcome\"\n}\n"
    );

    // Second extraction runs from the project root with no flag; the
    // remembered path must point at the same dictionary.
    let output = test
        .extract_command("app/Home/index.tsx")
        .args(["--name", "subtitle", "--id", "home.subtitle"])
        .args(["--text", "Get started"])
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!test.root().join("locales/en.json").exists());
    assert_eq!(
        test.read_file("app/locales/en.json")?,
        "{\n    \"home.title\": \"Welcome\",\n    \"home.subtitle\": \"Get started\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_locale_file_flag_creates_config_when_missing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Home/index.tsx", "<h1>Welcome</h1>\n")?;

    let output = test
        .extract_command("Home/index.tsx")
        .args(["--name", "title", "--id", "home.title", "--text", "Welcome"])
        .args(["--locale-file", "locales/en.json"])
        .output()?;
    assert!(output.status.success());

    let config = test.read_file(".intlxrc.json")?;
    assert!(config.contains("locales/en.json"), "config: {}", config);

    // The remembered path works on its own from now on.
    let output = test
        .extract_command("Home/index.tsx")
        .args(["--name", "subtitle", "--id", "home.subtitle"])
        .args(["--text", "Get started"])
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        test.read_file("locales/en.json")?,
        "{\n    \"home.title\": \"Welcome\",\n    \"home.subtitle\": \"Get started\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_corrupt_dictionary_aborts_without_touching_definitions() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Home/index.tsx", "<h1>Welcome</h1>\n")?;
    test.write_file("locales/en.json", "{broken")?;

    let output = test
        .extract_command("Home/index.tsx")
        .args(["--name", "title", "--id", "home.title", "--text", "Welcome"])
        .args(["--locale-file", "locales/en.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not valid JSON"));
    assert!(!test.root().join("Home/Home.messages.ts").exists());
    assert_eq!(test.read_file("locales/en.json")?, "{broken");

    Ok(())
}

#[test]
fn test_invalid_variable_name_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Home/index.tsx", "<h1>Welcome</h1>\n")?;

    let output = test
        .extract_command("Home/index.tsx")
        .args(["--name", "my-title", "--id", "home.title", "--text", "Welcome"])
        .args(["--locale-file", "locales/en.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a valid variable name"));

    Ok(())
}
