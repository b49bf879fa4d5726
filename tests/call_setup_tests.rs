use stream_audio_utils::audio::codes::MODE_IN_COMMUNICATION;
use stream_audio_utils::audio::test_service::{TestAudioProvider, TestAudioService};
use stream_audio_utils::audio::AudioSessionConfigurator;
use stream_audio_utils::Config;

fn configurator(service: TestAudioService) -> AudioSessionConfigurator<TestAudioProvider> {
    AudioSessionConfigurator::new(TestAudioProvider::new(service), Config::default())
}

#[test]
fn sets_communication_mode_and_reads_back_parameters() {
    let cfg = configurator(TestAudioService::new());
    let result = cfg.configure_for_call();

    assert_eq!(
        result,
        "Fluence: fluence=broadside; EC: ec_enable=true; NS: noise_suppression=true; "
    );
    let service = cfg.provider().service.borrow();
    assert_eq!(service.mode, MODE_IN_COMMUNICATION);
    assert_eq!(service.parameters.get("agc_enable").map(String::as_str), Some("true"));
    assert_eq!(service.parameters.get("ec_supported").map(String::as_str), Some("true"));
}

#[test]
fn parameters_are_applied_in_order() {
    let cfg = configurator(TestAudioService::new());
    cfg.configure_for_call();

    let calls = cfg.provider().calls();
    let sets: Vec<&str> = calls
        .iter()
        .filter(|c| c.starts_with("set_"))
        .map(String::as_str)
        .collect();
    assert_eq!(
        sets,
        [
            "set_mode(3)",
            "set_parameters(ec_enable=true)",
            "set_parameters(ec_supported=true)",
            "set_parameters(noise_suppression=true)",
            "set_parameters(agc_enable=true)",
            "set_parameters(fluence=broadside)",
        ]
    );
}

#[test]
fn first_fluence_candidate_with_readback_wins() {
    let mut service = TestAudioService::new();
    service.ignored_parameters.insert("fluence=broadside".to_string());
    let cfg = configurator(service);

    let result = cfg.configure_for_call();
    assert!(result.starts_with("Fluence: fluence=endfire; "), "{}", result);

    let calls = cfg.provider().calls();
    assert!(!calls.iter().any(|c| c == "set_parameters(fluence=dualmic)"));
}

#[test]
fn no_fluence_segment_when_every_candidate_is_ignored() {
    let mut service = TestAudioService::new();
    for mode in ["broadside", "endfire", "dualmic"] {
        service.ignored_parameters.insert(format!("fluence={}", mode));
    }
    let cfg = configurator(service);

    let result = cfg.configure_for_call();
    assert!(!result.contains("Fluence:"), "{}", result);
    assert!(result.contains("EC: ec_enable=true; "));

    let fluence_reads = cfg
        .provider()
        .calls()
        .iter()
        .filter(|c| *c == "parameters(fluence)")
        .count();
    assert_eq!(fluence_reads, 3);
}

#[test]
fn fluence_is_skipped_below_capability_gate() {
    let mut service = TestAudioService::new();
    service.platform.sdk_int = 22;
    let cfg = configurator(service);

    let result = cfg.configure_for_call();
    assert_eq!(result, "EC: ec_enable=true; NS: noise_suppression=true; ");
    assert!(!cfg.provider().calls().iter().any(|c| c.contains("fluence")));
}

#[test]
fn agc_fault_degrades_to_warning() {
    let mut service = TestAudioService::new();
    service.faulting_keys.insert("agc_enable".to_string());
    let cfg = configurator(service);

    let result = cfg.configure_for_call();
    assert_eq!(
        result,
        "Warning: Some audio parameters not supported: parameter 'agc_enable' raised"
    );

    let service = cfg.provider().service.borrow();
    assert_eq!(service.mode, MODE_IN_COMMUNICATION);
    assert_eq!(service.parameters.get("ec_enable").map(String::as_str), Some("true"));
}

#[test]
fn late_fault_keeps_earlier_readbacks() {
    let mut service = TestAudioService::new();
    service.faulting_reads.insert("noise_suppression".to_string());
    let cfg = configurator(service);

    let result = cfg.configure_for_call();
    assert_eq!(
        result,
        "Fluence: fluence=broadside; EC: ec_enable=true; \
         Warning: Some audio parameters not supported: reading 'noise_suppression' raised"
    );
}

#[test]
fn platform_info_fault_is_a_warning_not_an_error() {
    let mut service = TestAudioService::new();
    service.faulting_operations.insert("platform_info");
    let cfg = configurator(service);

    assert_eq!(
        cfg.configure_for_call(),
        "Warning: Some audio parameters not supported: platform_info raised"
    );
    assert_eq!(cfg.provider().service.borrow().mode, MODE_IN_COMMUNICATION);
}

#[test]
fn mode_switch_failure_is_an_error() {
    let mut service = TestAudioService::new();
    service.faulting_operations.insert("set_mode");
    let cfg = configurator(service);

    assert_eq!(cfg.configure_for_call(), "Error: set_mode raised");
    assert_eq!(cfg.provider().calls(), ["set_mode(3)"]);
}

#[test]
fn unavailable_service_is_an_error_and_nothing_runs() {
    let cfg = AudioSessionConfigurator::new(
        TestAudioProvider::unavailable("audio service missing"),
        Config::default(),
    );

    assert_eq!(cfg.configure_for_call(), "Error: audio service missing");
    assert!(cfg.provider().calls().is_empty());
}

#[test]
fn repeated_setup_reapplies_the_same_settings() {
    let cfg = configurator(TestAudioService::new());
    let first = cfg.configure_for_call();
    let second = cfg.configure_for_call();
    assert_eq!(first, second);
}
