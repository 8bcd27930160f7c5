//! Packaged output naming.

/// `{project}-v{version_name}.APK` for `.apk` outputs; `None` leaves the
/// output name untouched.
pub fn output_file_name(project: &str, version_name: &str, current: &str) -> Option<String> {
    if current.ends_with(".apk") {
        Some(format!("{project}-v{version_name}.APK"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::output_file_name;

    #[test]
    fn renames_apk_outputs() {
        assert_eq!(
            output_file_name("TXHook", "3.3.0.r42.abc1234", "app-release.apk").as_deref(),
            Some("TXHook-v3.3.0.r42.abc1234.APK")
        );
    }

    #[test]
    fn leaves_other_outputs_alone() {
        assert_eq!(output_file_name("TXHook", "3.3.0", "app-release.aab"), None);
        assert_eq!(output_file_name("TXHook", "3.3.0", "app-release.APK"), None);
        assert_eq!(output_file_name("TXHook", "3.3.0", ""), None);
    }
}
