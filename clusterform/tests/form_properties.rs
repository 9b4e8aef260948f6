use clusterform::{
    Catalogs, ConfigurationRecord, Field, FormContext, Mode, RawFields,
    data::{MachineSize, MachineSizeCatalog, StorageTier, StorageTierCatalog, Tier},
    resolver::{data_disk_range, storage_tier_effects},
    validate,
};

const DISCOVERY: &str = "https://discovery.etcd.io/a1b2c3d4e5f60718293a4b5c6d7e8f90";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn catalogs() -> Catalogs {
    let sizes: MachineSizeCatalog = [
        ("Standard_A0", MachineSize::with_disks(1)),
        ("Standard_A1", MachineSize::with_disks(2)),
        ("Standard_D2", MachineSize::with_disks(4)),
        ("Standard_D14", MachineSize::with_disks(64)),
    ]
    .into_iter()
    .collect();
    let tiers: StorageTierCatalog = [
        (
            "premium-p10",
            StorageTier {
                sku: "P10".to_string(),
                tier: Tier::Premium,
                capacity_gb: 128,
                iops: 500,
            },
        ),
        (
            "premium-p40",
            StorageTier {
                sku: "P40".to_string(),
                tier: Tier::Premium,
                capacity_gb: 2048,
                iops: 7500,
            },
        ),
        (
            "standard-s20",
            StorageTier {
                sku: "S20".to_string(),
                tier: Tier::Standard,
                capacity_gb: 512,
                iops: 500,
            },
        ),
    ]
    .into_iter()
    .collect();
    Catalogs::new(sizes, tiers)
}

fn arm_form() -> RawFields {
    [
        ("node-count", "5"),
        ("node-size", "Standard_D2"),
        ("data-disks", "4"),
        ("storage-account-prefix", "coreos"),
        ("ssh-key", "ssh-rsa AAAAB3NzaC1yc2E= admin@example"),
        ("admin-username", "core"),
        ("etcd-discovery-url", DISCOVERY),
    ]
    .into_iter()
    .collect()
}

#[test]
fn data_disk_range_stays_within_bounds() {
    let catalogs = catalogs();
    for name in [
        "Standard_A0",
        "Standard_A1",
        "Standard_D2",
        "Standard_D14",
        "unknown",
        "",
    ] {
        let range = data_disk_range(&catalogs.sizes, name);
        assert_eq!(range.min, 2);
        assert!((2..=40).contains(&range.max), "{name}: {range:?}");
    }
    let unknown = data_disk_range(&catalogs.sizes, "Standard_Unknown");
    assert_eq!((unknown.min, unknown.max), (2, 2));
}

#[test]
fn storage_tier_effects_follow_sentinel() {
    let catalogs = catalogs();
    let unmanaged = storage_tier_effects(&catalogs.tiers, "unmanaged-standard").unwrap();
    assert_eq!(unmanaged.iops, 500);
    assert!(unmanaged.requires_prefix);

    for (key, tier) in catalogs.tiers.iter() {
        let effects = storage_tier_effects(&catalogs.tiers, key).unwrap();
        assert_eq!(effects.iops, tier.iops);
        assert!(!effects.requires_prefix);
    }
}

#[test]
fn arm_node_count_membership() {
    init_logger();
    let catalogs = catalogs();
    let mut raw = arm_form();
    for ok in ["3", "5"] {
        raw.set(Field::NodeCount, ok);
        assert!(validate(&raw, &Mode::Arm, &catalogs).is_ok());
    }
    for bad in ["1", "2", "4", "6", "7"] {
        raw.set(Field::NodeCount, bad);
        let err = validate(&raw, &Mode::Arm, &catalogs).unwrap_err();
        assert_eq!(err.field, Field::NodeCount);
    }
}

#[test]
fn arm_data_disks_follow_selected_size() {
    let catalogs = catalogs();
    let mut raw = arm_form();
    raw.set(Field::DataDisks, "4");
    assert!(validate(&raw, &Mode::Arm, &catalogs).is_ok());

    for bad in ["5", "1"] {
        raw.set(Field::DataDisks, bad);
        let err = validate(&raw, &Mode::Arm, &catalogs).unwrap_err();
        assert_eq!(err.field, Field::DataDisks, "{bad}");
    }
}

#[test]
fn size_with_too_few_disks_accepts_no_data_disk_count() {
    init_logger();
    let catalogs = catalogs();
    let mut raw = arm_form();
    raw.set(Field::NodeSize, "Standard_A0");

    // The form still offers 2, but the size cannot attach that many.
    assert_eq!(data_disk_range(&catalogs.sizes, "Standard_A0").options(), 2..=2);
    for count in ["1", "2", "3"] {
        raw.set(Field::DataDisks, count);
        let err = validate(&raw, &Mode::Arm, &catalogs).unwrap_err();
        assert_eq!(err.field, Field::DataDisks, "{count}");
    }

    raw.set(Field::NodeSize, "Standard_A1");
    raw.set(Field::DataDisks, "2");
    assert!(validate(&raw, &Mode::Arm, &catalogs).is_ok());
}

#[test]
fn arm_disk_type_is_recorded_as_entered() {
    let catalogs = catalogs();
    let mut raw = arm_form();
    raw.set(Field::DiskType, "not-a-tier");
    let record = validate(&raw, &Mode::Arm, &catalogs).unwrap();
    let ConfigurationRecord::Arm { settings, .. } = record else {
        panic!("expected an ARM record");
    };
    assert_eq!(settings.disk_type.as_deref(), Some("not-a-tier"));
}

#[test]
fn discovery_url_normalization() {
    let catalogs = catalogs();
    let mut raw = arm_form();

    raw.set(Field::DiscoveryUrl, "");
    let record = validate(&raw, &Mode::Arm, &catalogs).unwrap();
    assert!(record.auto_generate_discovery());

    raw.set(Field::DiscoveryUrl, DISCOVERY);
    let record = validate(&raw, &Mode::Arm, &catalogs).unwrap();
    assert_eq!(record.discovery_url(), Some(DISCOVERY));

    raw.set(Field::DiscoveryUrl, "https://example.com/discovery");
    let err = validate(&raw, &Mode::Arm, &catalogs).unwrap_err();
    assert_eq!(err.field, Field::DiscoveryUrl);
}

#[test]
fn validation_is_idempotent() {
    let catalogs = catalogs();
    let mut raw = arm_form();
    assert_eq!(
        validate(&raw, &Mode::Arm, &catalogs),
        validate(&raw, &Mode::Arm, &catalogs)
    );

    raw.set(Field::SshKey, "not a key");
    assert_eq!(
        validate(&raw, &Mode::Arm, &catalogs),
        validate(&raw, &Mode::Arm, &catalogs)
    );
}

#[test]
fn first_failing_field_wins() {
    let catalogs = catalogs();
    let mut raw = arm_form();
    raw.set(Field::NodeCount, "4");
    raw.set(Field::NodeSize, "Standard_Nope");
    raw.set(Field::DiscoveryUrl, "bogus");
    let err = validate(&raw, &Mode::Arm, &catalogs).unwrap_err();
    assert_eq!(err.field, Field::NodeCount);

    raw.set(Field::NodeCount, "3");
    let err = validate(&raw, &Mode::Arm, &catalogs).unwrap_err();
    assert_eq!(err.field, Field::NodeSize);

    raw.set(Field::NodeSize, "Standard_D2");
    let err = validate(&raw, &Mode::Arm, &catalogs).unwrap_err();
    assert_eq!(err.field, Field::DiscoveryUrl);
}

#[test]
fn form_context_drives_a_submission() {
    init_logger();
    let mut form = FormContext::new(catalogs());

    let raw = arm_form();
    assert!(matches!(
        form.submit(&raw),
        Ok(ConfigurationRecord::ModeIndependent { tag: None, .. })
    ));

    form.set_mode("arm");
    let range = form.on_size_changed("Standard_D14");
    assert_eq!(range.default_selection(), 40);

    let record = form.submit(&raw).unwrap();
    assert_eq!(record.mode(), Mode::Arm);
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["mode"], "arm");
    assert_eq!(json["node_count"], 5);
    assert_eq!(json["discovery_url"], DISCOVERY);

    let back: ConfigurationRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}
