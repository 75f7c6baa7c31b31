use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("thumbkit-fonts-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[derive(Debug)]
struct Fixed(Vec<FontCandidate>);

impl FontProvider for Fixed {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn candidates(&self) -> Vec<FontCandidate> {
        self.0.clone()
    }
}

#[test]
fn builtin_only_resolves_builtin() {
    let r = FontResolver::builtin_only();
    assert_eq!(r.candidate_count(), 0);
    assert!(matches!(
        r.resolve(FontWeight::Bold, "hello"),
        ResolvedFont::Builtin
    ));
}

#[test]
fn bold_is_guessed_from_file_name() {
    assert!(FontCandidate::from_path("/f/DejaVuSans-Bold.ttf").bold);
    assert!(FontCandidate::from_path("C:/Windows/Fonts/arialbd.ttf").bold);
    assert!(!FontCandidate::from_path("/f/DejaVuSans.ttf").bold);
}

#[test]
fn directory_provider_lists_font_files_sorted() {
    let dir = scratch_dir("list");
    std::fs::write(dir.join("b.ttf"), b"x").unwrap();
    std::fs::write(dir.join("a.OTF"), b"x").unwrap();
    std::fs::write(dir.join("notes.txt"), b"x").unwrap();

    let found = DirectoryFonts::new([dir.clone()]).candidates();
    let names: Vec<_> = found
        .iter()
        .map(|c| c.path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.OTF", "b.ttf"]);
}

#[test]
fn unparseable_font_files_fall_back_to_builtin() {
    let dir = scratch_dir("garbage");
    std::fs::write(dir.join("broken.ttf"), b"definitely not a font").unwrap();

    let r = FontResolver::new(vec![Box::new(DirectoryFonts::new([dir]))]);
    assert_eq!(r.candidate_count(), 1);
    assert!(matches!(
        r.resolve(FontWeight::Normal, "abc"),
        ResolvedFont::Builtin
    ));
}

#[test]
fn duplicate_candidates_are_merged() {
    let c = FontCandidate::from_path("/nonexistent/Same.ttf");
    let r = FontResolver::new(vec![
        Box::new(Fixed(vec![c.clone(), c.clone()])),
        Box::new(Fixed(vec![c])),
    ]);
    assert_eq!(r.candidate_count(), 1);
}

#[test]
fn platform_tables_are_distinct() {
    assert_eq!(PlatformFonts::new(Platform::Linux).name(), "platform:linux");
    assert_eq!(PlatformFonts::new(Platform::Windows).name(), "platform:windows");
    assert_eq!(PlatformFonts::new(Platform::MacOs).name(), "platform:macos");
    // Windows paths never exist on the test host unless it is Windows.
    if Platform::current() != Platform::Windows {
        assert!(PlatformFonts::new(Platform::Windows).candidates().is_empty());
    }
}
