use anyhow::Result;
use phonenumber_utility::utils::validation::Validate;
use phonenumber_utility::{PhoneNumberUtility, Settings};
use tempfile::TempDir;

fn settings_in(temp_dir: &TempDir) -> Settings {
    Settings {
        results_path: temp_dir
            .path()
            .join("phonenumber_results.txt")
            .to_string_lossy()
            .into_owned(),
        log_path: temp_dir
            .path()
            .join("phonenumber_utility.log")
            .to_string_lossy()
            .into_owned(),
        ..Settings::default()
    }
}

#[tokio::test]
async fn test_menu_session_with_single_and_batch_entries() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let batch_path = temp_dir.path().join("batch.txt");
    std::fs::write(&batch_path, "+44 20 8765 4321\ninvalid\n")?;

    let settings = settings_in(&temp_dir);
    settings.validate()?;
    let mut utility = PhoneNumberUtility::from_config(&settings)?;

    let script = format!(
        "1\n+1 650-253-0000\n2\n{}\n2\n{}\n4\n3\n",
        batch_path.display(),
        temp_dir.path().join("missing.txt").display()
    );
    let mut input = script.as_bytes();
    let mut out = Vec::new();

    utility.run(&mut input, &mut out).await?;

    let printed = String::from_utf8(out)?;
    assert_eq!(printed.matches("Phone Number Utility Menu").count(), 5);
    assert!(printed.contains("Enter the path to the file: "));
    assert!(printed.contains("Error parsing number invalid: "));
    assert!(printed.contains("File not found: "));
    assert!(printed.contains("Invalid choice. Please try again.\n"));
    assert!(printed.ends_with("Exiting...\n"));

    let results = std::fs::read_to_string(&settings.results_path)?;
    assert_eq!(results.matches("Phone Number: ").count(), 2);
    assert_eq!(utility.results().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_default_region_and_data_dir_from_settings() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_dir = temp_dir.path().join("metadata");
    std::fs::create_dir(&data_dir)?;
    std::fs::write(
        data_dir.join("geocoding.csv"),
        "prefix,description\n4420,Greater London\n",
    )?;

    let settings = Settings {
        default_region: Some("GB".to_string()),
        data_dir: Some(data_dir.to_string_lossy().into_owned()),
        ..settings_in(&temp_dir)
    };
    settings.validate()?;

    let mut utility = PhoneNumberUtility::from_config(&settings)?;
    let mut input: &[u8] = b"1\n020 8765 4321\n3\n";
    let mut out = Vec::new();
    utility.run(&mut input, &mut out).await?;

    let results = std::fs::read_to_string(&settings.results_path)?;
    assert!(results.starts_with("Phone Number: +44 20 8765 4321\n"));
    assert!(results.contains("Region: Greater London\n"));
    Ok(())
}

#[test]
fn test_missing_data_dir_fails_validation() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings {
        data_dir: Some(temp_dir.path().join("nope").to_string_lossy().into_owned()),
        ..settings_in(&temp_dir)
    };
    assert!(settings.validate().is_err());
}

#[test]
fn test_from_config_rejects_unvalidated_region() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings {
        default_region: Some("India".to_string()),
        ..settings_in(&temp_dir)
    };

    assert!(PhoneNumberUtility::from_config(&settings).is_err());
}
