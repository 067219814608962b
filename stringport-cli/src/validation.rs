use std::path::Path;
use unic_langid::LanguageIdentifier;

/// Validate the Android project root: it must be a directory holding the manifest.
pub fn validate_android_root(path: &str, manifest_file: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.is_dir() {
        return Err(format!("Android directory does not exist: {}", path));
    }

    let manifest = path_obj.join(manifest_file);
    if !manifest.is_file() {
        return Err(format!(
            "file: {} does not exist! Base directory should point to an Android project.",
            manifest.display()
        ));
    }

    Ok(())
}

/// Validate the iOS project root exists and is a directory.
pub fn validate_ios_root(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!(
            "iOS directory: {} does not exist! Base directory should point to an iOS project root directory.",
            path
        ));
    }

    if !path_obj.is_dir() {
        return Err(format!("Path is not a directory: {}", path));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }

    Ok(())
}

/// Validate language code format using unic-langid
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    match lang.parse::<LanguageIdentifier>() {
        Ok(_) => Ok(()),
        Err(_) => Err(format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )),
    }
}
