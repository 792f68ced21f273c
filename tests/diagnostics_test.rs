mod common;

use std::fs;

use anyhow::Result;
use common::{capture_logs, inventory_path, take_logs, take_logs_at_least_info, test_service};
use log::Level;

fn single(logs: Vec<(Level, String)>) -> (Level, String) {
    assert_eq!(logs.len(), 1, "expected exactly one diagnostic, got {:?}", logs);
    logs.into_iter().next().unwrap()
}

#[test]
fn test_add_logs_info() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    capture_logs();

    service.add("apple", 10)?;

    assert_eq!(
        single(take_logs_at_least_info()),
        (Level::Info, "Added 10 of apple".to_string())
    );
    Ok(())
}

#[test]
fn test_invalid_add_logs_warning() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    capture_logs();

    assert!(service.add("  ", 5).is_err());
    let (level, message) = single(take_logs_at_least_info());
    assert_eq!(level, Level::Warn);
    assert!(message.starts_with("Invalid input for add"), "{}", message);

    assert!(service.add_from_input("apple", "five", None).is_err());
    let (level, message) = single(take_logs_at_least_info());
    assert_eq!(level, Level::Warn);
    assert!(message.contains("five"), "{}", message);
    Ok(())
}

#[test]
fn test_remove_logs_info_even_when_item_is_dropped() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    service.add("apple", 3)?;
    capture_logs();

    service.remove("apple", 5)?;

    let logs = take_logs();
    assert!(logs.iter().any(|(level, _)| *level == Level::Debug));
    let info: Vec<_> = logs.into_iter().filter(|(l, _)| *l <= Level::Info).collect();
    assert_eq!(
        single(info),
        (Level::Info, "Removed 5 of apple".to_string())
    );
    Ok(())
}

#[test]
fn test_remove_missing_item_logs_warning() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    capture_logs();

    assert!(service.remove("pear", 1).is_err());

    assert_eq!(
        single(take_logs_at_least_info()),
        (
            Level::Warn,
            "Attempted to remove non-existent item: pear".to_string()
        )
    );
    Ok(())
}

#[test]
fn test_get_quantity_logs_only_when_missing() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    service.add("apple", 3)?;
    capture_logs();

    service.get_quantity("apple");
    assert!(take_logs().is_empty());

    service.get_quantity("ghost");
    assert_eq!(
        single(take_logs_at_least_info()),
        (Level::Warn, "Item not found: ghost".to_string())
    );
    Ok(())
}

#[test]
fn test_load_logs_by_outcome() -> Result<()> {
    let (mut service, temp) = test_service()?;
    capture_logs();

    service.load()?;
    let (level, message) = single(take_logs_at_least_info());
    assert_eq!(level, Level::Warn);
    assert!(message.ends_with("not found. Starting with empty inventory."), "{}", message);

    fs::write(inventory_path(&temp), r#"{"apple": 1}"#)?;
    service.load()?;
    let (level, message) = single(take_logs_at_least_info());
    assert_eq!(level, Level::Info);
    assert!(message.starts_with("Data loaded from"), "{}", message);

    fs::write(inventory_path(&temp), "{ broken")?;
    assert!(service.load().is_err());
    let (level, message) = single(take_logs_at_least_info());
    assert_eq!(level, Level::Error);
    assert!(message.starts_with("Error loading data"), "{}", message);
    Ok(())
}

#[test]
fn test_save_logs_by_outcome() -> Result<()> {
    let (mut service, temp) = test_service()?;
    service.add("apple", 1)?;
    capture_logs();

    service.save()?;
    let (level, message) = single(take_logs_at_least_info());
    assert_eq!(level, Level::Info);
    assert!(message.starts_with("Data saved to"), "{}", message);

    let bad_path = temp.path().join("missing-dir").join("inventory.json");
    assert!(service.save_to(&bad_path).is_err());
    let (level, message) = single(take_logs_at_least_info());
    assert_eq!(level, Level::Error);
    assert!(message.starts_with("Error saving data"), "{}", message);
    Ok(())
}

#[test]
fn test_overflow_logs_error() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    service.add("grains", i64::MAX)?;
    service.add("debt", -10)?;
    capture_logs();

    assert!(service.add("grains", 1).is_err());
    let (level, message) = single(take_logs_at_least_info());
    assert_eq!(level, Level::Error);
    assert!(message.starts_with("Error adding item grains"), "{}", message);

    assert!(service.remove("debt", i64::MAX).is_err());
    let (level, message) = single(take_logs_at_least_info());
    assert_eq!(level, Level::Error);
    assert!(message.starts_with("Error removing item debt"), "{}", message);
    Ok(())
}
