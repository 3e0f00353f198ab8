use std::{
    fs,
    path::{Path, PathBuf},
};

use pretty_assertions::assert_eq;
use siprelayd::configuration::{
    load_configuration,
    BoundedStringList,
    Configuration,
    ConfigurationLoadError,
    ConfigurationLoader,
    DiagnosticKind,
    FieldType,
    PathResolver,
    CONFIGURATION_STRING_LIST_CAPACITY,
};
use tempfile::TempDir;


fn write_configuration_file(directory: &TempDir, file_name: &str, contents: &str) -> PathBuf {
    let path = directory.path().join(file_name);
    fs::write(&path, contents).unwrap();
    path
}

fn path_as_name(path: &Path) -> &str {
    path.to_str().unwrap()
}


#[test]
fn loads_a_complete_configuration_file() {
    let directory = tempfile::tempdir().unwrap();
    let path = write_configuration_file(
        &directory,
        "siprelayd.conf",
        "# siprelayd example configuration\n\
         \n\
         debug_level = 0x10\n\
         sip_listen_port = 5070\n\
         daemonize = 1\n\
         if_inbound = eth0\n\
         if_outbound = ppp0\n\
         rtp_port_low = 7000\n\
         rtp_port_high = 7010\n\
         rtp_timeout = 600\n\
         rtp_proxy_enable = 0\n\
         user = nobody\n\
         chrootjail = /var/lib/siprelayd\n\
         hosts_allow_reg = 192.168.1.0/24\n\
         hosts_allow_sip = 192.168.0.0/16\n\
         hosts_deny_sip = 10.0.0.0/8\n\
         proxy_auth_realm = Authentication_Realm\n\
         proxy_auth_passwd = secret\n\
         proxy_auth_pwfile = /etc/siprelayd_passwd.cfg\n\
         mask_host = 192.168.1.2\n\
         masked_host = sipphone.example.org\n",
    );

    let loaded = load_configuration(path_as_name(&path), false).unwrap();
    assert!(loaded.diagnostics.is_empty());

    let mut expected_mask_host = BoundedStringList::default();
    expected_mask_host.try_push("192.168.1.2").unwrap();
    let mut expected_masked_host = BoundedStringList::default();
    expected_masked_host.try_push("sipphone.example.org").unwrap();

    assert_eq!(
        loaded.configuration,
        Configuration {
            debug_level: 16,
            sip_listen_port: 5070,
            daemonize: 1,
            inbound_interface: Some("eth0".to_string()),
            outbound_interface: Some("ppp0".to_string()),
            rtp_port_low: 7000,
            rtp_port_high: 7010,
            rtp_timeout: 600,
            rtp_proxy_enable: 0,
            user: Some("nobody".to_string()),
            chroot_jail: Some("/var/lib/siprelayd".to_string()),
            hosts_allow_register: Some("192.168.1.0/24".to_string()),
            hosts_allow_sip: Some("192.168.0.0/16".to_string()),
            hosts_deny_sip: Some("10.0.0.0/8".to_string()),
            proxy_auth_realm: Some("Authentication_Realm".to_string()),
            proxy_auth_password: Some("secret".to_string()),
            proxy_auth_password_file: Some("/etc/siprelayd_passwd.cfg".to_string()),
            mask_host: expected_mask_host,
            masked_host: expected_masked_host,
        }
    );
}

#[test]
fn records_the_canonical_path_of_the_loaded_file() {
    let directory = tempfile::tempdir().unwrap();
    let path = write_configuration_file(&directory, "relay.conf", "debug_level = 3\n");

    let loaded = load_configuration(path_as_name(&path), false).unwrap();

    assert_eq!(loaded.configuration.debug_level, 3);
    assert_eq!(loaded.file_path, canonical_path(&path));
}

fn canonical_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap()
}

#[test]
fn comment_only_file_leaves_defaults_in_place() {
    let directory = tempfile::tempdir().unwrap();
    let path = write_configuration_file(&directory, "relay.conf", "# comment\n\n");

    let loaded = load_configuration(path_as_name(&path), false).unwrap();

    assert_eq!(loaded.configuration, Configuration::default());
    assert!(loaded.diagnostics.is_empty());
}

#[test]
fn malformed_lines_are_reported_but_do_not_fail_the_load() {
    let directory = tempfile::tempdir().unwrap();
    let path = write_configuration_file(
        &directory,
        "relay.conf",
        "bogus=1\n\
         debug_level 3\n\
         sip_listen_port = loud\n\
         rtp_timeout = 45\n",
    );

    let loaded = load_configuration(path_as_name(&path), false).unwrap();

    assert_eq!(loaded.configuration.debug_level, 0);
    assert_eq!(loaded.configuration.sip_listen_port, 5060);
    assert_eq!(loaded.configuration.rtp_timeout, 45);

    let kinds = loaded.diagnostics.kinds().cloned().collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::UnknownKeyword,
            DiagnosticKind::MissingArgument {
                keyword: "debug_level"
            },
            DiagnosticKind::ConversionFailed {
                keyword: "sip_listen_port",
                expected: FieldType::Int32,
            },
        ]
    );
}

#[test]
fn string_list_overflow_is_reported_and_dropped() {
    let directory = tempfile::tempdir().unwrap();

    let mut contents = String::new();
    for index in 0..=CONFIGURATION_STRING_LIST_CAPACITY {
        contents.push_str(&format!("mask_host = host{}\n", index));
    }
    let path = write_configuration_file(&directory, "relay.conf", &contents);

    let loaded = load_configuration(path_as_name(&path), false).unwrap();
    let mask_host = &loaded.configuration.mask_host;

    assert_eq!(mask_host.len(), CONFIGURATION_STRING_LIST_CAPACITY);
    assert_eq!(mask_host.get(0), Some("host0"));
    assert_eq!(
        mask_host.get(CONFIGURATION_STRING_LIST_CAPACITY - 1),
        Some(format!("host{}", CONFIGURATION_STRING_LIST_CAPACITY - 1).as_str())
    );

    let diagnostics = loaded.diagnostics.as_slice();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].kind,
        DiagnosticKind::CapacityExceeded {
            keyword: "mask_host",
            capacity: CONFIGURATION_STRING_LIST_CAPACITY,
        }
    );
    assert_eq!(
        diagnostics[0].line_number,
        Some(CONFIGURATION_STRING_LIST_CAPACITY + 1)
    );
}

#[test]
fn missing_literal_file_is_fatal() {
    let directory = tempfile::tempdir().unwrap();
    let missing_path = directory.path().join("does-not-exist.conf");

    let error = load_configuration(path_as_name(&missing_path), false).unwrap_err();

    assert!(matches!(error, ConfigurationLoadError::FileNotFound { .. }));
    assert_eq!(error.attempted_paths(), &[missing_path]);
}

#[test]
fn literal_mode_never_tries_the_search_paths() {
    let home_directory = tempfile::tempdir().unwrap();
    // Would be found in search mode.
    write_configuration_file(&home_directory, ".relayrc", "debug_level = 1\n");

    let loader = ConfigurationLoader::new()
        .with_resolver(PathResolver::with_home_directory(Some(home_directory.path())));

    let error = loader.load("relay", false).unwrap_err();

    assert_eq!(error.attempted_paths(), &[PathBuf::from("relay")]);
}

#[test]
fn search_mode_finds_the_per_user_file() {
    let home_directory = tempfile::tempdir().unwrap();
    write_configuration_file(
        &home_directory,
        ".siprelayd-integration-testrc",
        "user = alice\nmask_host = 10.0.0.1\nmask_host = 10.0.0.2\n",
    );

    let loader = ConfigurationLoader::new()
        .with_resolver(PathResolver::with_home_directory(Some(home_directory.path())));

    let loaded = loader.load("siprelayd-integration-test", true).unwrap();

    assert_eq!(loaded.configuration.user.as_deref(), Some("alice"));
    assert_eq!(
        loaded.configuration.mask_host.iter().collect::<Vec<_>>(),
        vec!["10.0.0.1", "10.0.0.2"]
    );
}

#[test]
fn search_mode_reports_every_attempted_path() {
    let home_directory = tempfile::tempdir().unwrap();
    let name = "siprelayd-integration-test-missing";

    let loader = ConfigurationLoader::new()
        .with_resolver(PathResolver::with_home_directory(Some(home_directory.path())));

    let error = loader.load(name, true).unwrap_err();

    assert!(matches!(error, ConfigurationLoadError::FileNotFound { .. }));
    assert_eq!(
        error.attempted_paths(),
        &[
            home_directory.path().join(format!(".{}rc", name)),
            PathBuf::from(format!("/etc/{}.conf", name)),
            PathBuf::from(format!("/usr/etc/{}.conf", name)),
            PathBuf::from(format!("/usr/local/etc/{}.conf", name)),
        ]
    );
}

#[test]
fn loading_into_an_existing_configuration_keeps_unrelated_fields() {
    let directory = tempfile::tempdir().unwrap();
    let path = write_configuration_file(&directory, "relay.conf", "if_outbound = eth1\n");

    let mut configuration = Configuration {
        user: Some("operator".to_string()),
        ..Configuration::default()
    };

    let report = ConfigurationLoader::new()
        .load_into(&mut configuration, path_as_name(&path), false)
        .unwrap();

    assert!(report.diagnostics.is_empty());
    assert_eq!(configuration.outbound_interface.as_deref(), Some("eth1"));
    assert_eq!(configuration.user.as_deref(), Some("operator"));
}

#[test]
fn load_from_path_reads_the_given_file() {
    let directory = tempfile::tempdir().unwrap();
    let path = write_configuration_file(&directory, "relay.conf", "rtp_timeout = 90\n");

    let loaded = Configuration::load_from_path(&path).unwrap();

    assert_eq!(loaded.configuration.rtp_timeout, 90);
    assert_eq!(loaded.file_path, canonical_path(&path));
}

#[cfg(unix)]
#[test]
fn load_from_path_accepts_non_utf8_file_names() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join(OsStr::from_bytes(b"relay-\xff.conf"));
    fs::write(&path, "debug_level = 7\n").unwrap();

    let loaded = Configuration::load_from_path(&path).unwrap();

    assert_eq!(loaded.configuration.debug_level, 7);
    assert!(loaded.diagnostics.is_empty());
}

#[test]
fn load_from_default_paths_searches_the_system_directories() {
    // Whether a system-wide file exists depends on the host.
    match Configuration::load_from_default_paths() {
        Ok(loaded) => assert!(loaded.file_path.is_absolute()),
        Err(error) => {
            let attempted_paths = error.attempted_paths();
            assert!(attempted_paths.len() >= 3);
            assert_eq!(
                &attempted_paths[attempted_paths.len() - 3..],
                &[
                    PathBuf::from("/etc/siprelayd.conf"),
                    PathBuf::from("/usr/etc/siprelayd.conf"),
                    PathBuf::from("/usr/local/etc/siprelayd.conf"),
                ]
            );
        }
    }
}
