use super::*;

#[test]
fn empty_text_yields_defaults() {
    let s = Settings::parse("").unwrap();
    assert_eq!(s, Settings::default());
    assert_eq!(s.mode, Mode::Context);
    assert_eq!(s.score_start, 0);
    assert_eq!(s.dispatcher_name, "frame");
}

#[test]
fn english_keys_are_recognized() {
    let text = "\
mode: 1
player: #anim
objective: ticks
interpolation: 3
score_start: 10
namespace: pack:anim/
dispatcher_name: play
frame_dir: out/frames
dispatcher_dir: out
";
    let s = Settings::parse(text).unwrap();
    assert_eq!(s.mode, Mode::Direct);
    assert_eq!(s.player, "#anim");
    assert_eq!(s.objective, "ticks");
    assert_eq!(s.default_interpolation, Some(3));
    assert_eq!(s.score_start, 10);
    assert_eq!(s.namespace, "pack:anim/");
    assert_eq!(s.dispatcher_name, "play");
    assert_eq!(s.frame_dir, Some(PathBuf::from("out/frames")));
    assert_eq!(s.dispatcher_dir, Some(PathBuf::from("out")));
}

#[test]
fn legacy_keys_are_recognized() {
    let text = "생성모드: 1\n스코어 이름(선택): anim\n시작 스코어 값(선택): 5\n네임스페이스: ns:\n";
    let s = Settings::parse(text).unwrap();
    assert_eq!(s.mode, Mode::Direct);
    assert_eq!(s.objective, "anim");
    assert_eq!(s.score_start, 5);
    assert_eq!(s.namespace, "ns:");
}

#[test]
fn value_split_happens_on_first_colon_only() {
    let s = Settings::parse("namespace: pack:fx/intro/").unwrap();
    assert_eq!(s.namespace, "pack:fx/intro/");
}

#[test]
fn blank_values_and_unknown_keys_are_ignored() {
    let s = Settings::parse("player:\nfoo: bar\nnot a setting\n").unwrap();
    assert_eq!(s.player, DEFAULT_PLAYER);
}

#[test]
fn invalid_mode_is_a_config_error() {
    let err = Settings::parse("mode: 2").unwrap_err();
    assert!(err.to_string().contains("config error:"));
    assert!(Settings::parse("mode: fast").is_err());
}

#[test]
fn non_integer_score_start_falls_back_to_zero() {
    let s = Settings::parse("score_start: abc").unwrap();
    assert_eq!(s.score_start, 0);
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::from_path(dir.path().join("setting.txt")).unwrap_err();
    assert!(matches!(err, BdError::Config(_)));
}

#[test]
fn output_dirs_fall_back_to_result_dir() {
    let result = Path::new("result");
    let s = Settings::default();
    assert_eq!(s.frame_dir_or(result), result);
    let s = Settings::parse("dispatcher_dir: elsewhere").unwrap();
    assert_eq!(s.dispatcher_dir_or(result), Path::new("elsewhere"));
    assert_eq!(s.frame_dir_or(result), result);
}
