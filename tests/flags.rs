//! Integration tests for containers of flag constants and the flag algebra.

use symbolic_constants::{ConstantsContainer, ConstantsError, FlagConstant, constants};

constants! {
    pub flags FXF {
        // Implicitly assigned, in declaration order
        READ,
        WRITE,
        APPEND,

        // Explicitly assigned
        EXCLUSIVE = 0x20,

        // Implicitly assigned, following the explicit value
        TEXT,
    }
}

constants! {
    pub flags TIMEX {
        ADJ_OFFSET = 0x0001,
        ADJ_FREQUENCY = 0x0002,
        // xntp 3.4 compatibility name
        MOD_OFFSET = 0x0001,
    }
}

constants! {
    pub flags ACCESS {
        READ,
        WRITE,
        RW = 0x03,
        EXEC,
    }
}

fn read_write() -> FlagConstant { FXF::read() | FXF::write() }

fn write_append() -> FlagConstant { FXF::write() | FXF::append() }

#[test]
fn test_not_instantiable() {
    let error = FXF::instantiate().unwrap_err();
    assert_eq!(error.to_string(), "FXF may not be instantiated.");
}

#[test]
fn test_representation() {
    assert_eq!(format!("{:?}", FXF::read()), "<FXF=READ>");
}

#[test]
fn test_lookup_by_name() {
    assert!(std::ptr::eq(FXF::lookup_by_name("READ").unwrap(), FXF::read()));
    for name in ["lookup_by_name", "__init__", "foo"] {
        assert!(FXF::lookup_by_name(name).unwrap_err().is_not_found());
    }
}

#[test]
fn test_assigned_values() {
    assert_eq!(FXF::read().value(), 0x01);
    assert_eq!(FXF::write().value(), 0x02);
    assert_eq!(FXF::append().value(), 0x04);
    assert_eq!(FXF::exclusive().value(), 0x20);
    assert_eq!(FXF::text().value(), 0x40);
}

#[test]
fn test_lookup_by_value() {
    assert!(std::ptr::eq(FXF::lookup_by_value(&0x01).unwrap(), FXF::read()));
    assert!(std::ptr::eq(FXF::lookup_by_value(&0x02).unwrap(), FXF::write()));
    assert!(std::ptr::eq(FXF::lookup_by_value(&0x04).unwrap(), FXF::append()));
    assert!(std::ptr::eq(FXF::lookup_by_value(&0x20).unwrap(), FXF::exclusive()));
    assert!(std::ptr::eq(FXF::lookup_by_value(&0x40).unwrap(), FXF::text()));
}

#[test]
fn test_lookup_duplicate_by_value() {
    assert!(std::ptr::eq(TIMEX::lookup_by_value(&0x0001).unwrap(), TIMEX::adj_offset()));
}

#[test]
fn test_not_lookup_missing_by_value() {
    assert_eq!(
        FXF::lookup_by_value(&0x10).unwrap_err(),
        ConstantsError::ValueNotFound { container: "FXF", value: "16".to_string() }
    );
}

#[test]
fn test_composites_are_not_registered() {
    let flag = read_write();
    assert!(FXF::lookup_by_value(&flag.value()).is_err());
    assert_eq!(FXF::iter_constants().len(), 5);
}

#[test]
fn test_iter_constants() {
    let constants: Vec<_> = FXF::iter_constants().collect();
    assert_eq!(
        constants,
        [FXF::read(), FXF::write(), FXF::append(), FXF::exclusive(), FXF::text()]
    );
}

#[test]
fn test_initialized_once() {
    let first = FXF::constants().enumerants();
    let _ = FXF::read();
    let second = FXF::constants().enumerants();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn test_or() {
    let flag = read_write();
    assert_eq!(flag.value(), FXF::read().value() | FXF::write().value());
    assert_eq!(flag.name(), "{READ,WRITE}");
    assert_eq!(format!("{:?}", flag), "<FXF={READ,WRITE}>");
}

#[test]
fn test_and() {
    let flag = read_write() & write_append();
    assert_eq!(flag.value(), FXF::write().value());
    assert_eq!(flag.name(), "WRITE");
    assert_eq!(format!("{:?}", flag), "<FXF=WRITE>");
    // Same bits, but a different constant
    assert_ne!(&flag, FXF::write());
}

#[test]
fn test_xor() {
    let flag = read_write() ^ write_append();
    assert_eq!(flag.value(), FXF::read().value() | FXF::append().value());
    assert_eq!(flag.name(), "{APPEND,READ}");
    assert_eq!(format!("{:?}", flag), "<FXF={APPEND,READ}>");
}

#[test]
fn test_not() {
    let flag = !FXF::read();
    assert_eq!(
        flag.value(),
        FXF::write().value()
            | FXF::append().value()
            | FXF::exclusive().value()
            | FXF::text().value()
    );

    let flag = !FXF::write();
    assert_eq!(
        flag.value(),
        FXF::read().value()
            | FXF::append().value()
            | FXF::exclusive().value()
            | FXF::text().value()
    );
    assert_eq!(flag.name(), "{APPEND,EXCLUSIVE,READ,TEXT}");
    assert_eq!(format!("{:?}", flag), "<FXF={APPEND,EXCLUSIVE,READ,TEXT}>");
}

#[test]
fn test_named_methods_match_operators() {
    let union = FXF::read().union(FXF::write()).unwrap();
    let intersection = read_write().intersection(&write_append()).unwrap();
    let difference = read_write().symmetric_difference(&write_append()).unwrap();
    let complement = FXF::write().complement().unwrap();
    assert_eq!(union.name(), read_write().name());
    assert_eq!(intersection.name(), "WRITE");
    assert_eq!(difference.name(), "{APPEND,READ}");
    assert_eq!(complement.name(), (!FXF::write()).name());
}

#[test]
fn test_operands_unchanged() {
    let left = read_write();
    let right = write_append();
    let _ = &left | &right;
    let _ = !&left;
    assert_eq!(left.name(), "{READ,WRITE}");
    assert_eq!(right.value(), 0x06);
}

#[test]
fn test_combining_containers() {
    assert_eq!(
        FXF::read().union(TIMEX::adj_offset()).unwrap_err(),
        ConstantsError::ContainerMismatch { left: "FXF", right: "TIMEX" }
    );
    assert!(FXF::read().intersection(TIMEX::mod_offset()).is_err());
}

#[test]
fn test_contains_and_iter() {
    let flag = read_write();
    assert!(flag.contains(FXF::read()));
    assert!(flag.contains(FXF::write()));
    assert!(!flag.contains(FXF::append()));
    assert!(!flag.contains(TIMEX::adj_offset()));

    let members: Vec<&FlagConstant> = (FXF::text() | FXF::read()).iter().collect();
    assert_eq!(members, [FXF::read(), FXF::text()]);

    let names: Vec<&str> = (FXF::text() | FXF::read()).flag_names().collect();
    assert_eq!(names, ["READ", "TEXT"]);
}

#[test]
fn test_empty() {
    let nothing = FXF::read() & FXF::write();
    assert!(nothing.is_empty());
    assert_eq!(nothing.name(), "{}");
    assert_eq!(nothing.iter().count(), 0);
    assert!(!FXF::read().is_empty());
}

#[test]
fn test_flags_for_value() {
    let flag = FXF::constants().flags_for_value(0x23).unwrap();
    assert_eq!(flag.name(), "{EXCLUSIVE,READ,WRITE}");
    assert_eq!(flag.value(), 0x23);
    assert_eq!(FXF::constants().universe(), 0x67);
    assert!(FXF::constants().flags_for_value(0x80).is_err());
}

#[test]
fn test_complement_with_duplicate_values() {
    let flag = !TIMEX::adj_offset();
    assert_eq!(flag.value(), 0x0002);
    assert_eq!(flag.name(), "ADJ_FREQUENCY");

    let flag = !TIMEX::mod_offset();
    assert_eq!(flag.value(), 0x0002);
    assert_eq!(flag.name(), "ADJ_FREQUENCY");
}

#[test]
fn test_algebra_with_duplicate_values() {
    let both = TIMEX::adj_offset() & TIMEX::mod_offset();
    assert_eq!(both.value(), 0x0001);
    assert_eq!(both.name(), "{ADJ_OFFSET,MOD_OFFSET}");

    let all = TIMEX::adj_offset() | TIMEX::adj_frequency();
    assert_eq!(all.value(), 0x0003);
    assert_eq!(all.name(), "{ADJ_FREQUENCY,ADJ_OFFSET,MOD_OFFSET}");

    let neither = TIMEX::adj_offset() ^ TIMEX::mod_offset();
    assert_eq!(neither.value(), 0);
    assert_eq!(neither.name(), "{}");

    let names: Vec<&str> = TIMEX::adj_offset().flag_names().collect();
    assert_eq!(names, ["ADJ_OFFSET", "MOD_OFFSET"]);
}

#[test]
fn test_multi_bit_declared_value() {
    assert_eq!(ACCESS::rw().value(), 0x03);
    assert_eq!(ACCESS::exec().value(), 0x04);
    assert!(std::ptr::eq(ACCESS::lookup_by_value(&0x03).unwrap(), ACCESS::rw()));

    let members: Vec<&FlagConstant> = ACCESS::rw().iter().collect();
    assert_eq!(members, [ACCESS::read(), ACCESS::write(), ACCESS::rw()]);
    assert!(ACCESS::rw().contains(ACCESS::read()));
    assert!(!ACCESS::read().contains(ACCESS::rw()));
}

#[test]
fn test_complement_of_multi_bit_flag() {
    let flag = !ACCESS::rw();
    assert_eq!(flag.value(), 0x04);
    assert_eq!(flag.name(), "EXEC");

    let flag = !ACCESS::read();
    assert_eq!(flag.value(), 0x06);
    assert_eq!(flag.name(), "{EXEC,WRITE}");
}

#[test]
fn test_algebra_with_overlapping_values() {
    let read_write = ACCESS::read() | ACCESS::write();
    assert_eq!(read_write.value(), 0x03);
    assert_eq!(read_write.name(), "{READ,RW,WRITE}");
    assert_eq!(
        read_write.name(),
        ACCESS::constants().flags_for_value(0x03).unwrap().name()
    );

    let flag = ACCESS::rw() & ACCESS::read();
    assert_eq!(flag.value(), 0x01);
    assert_eq!(flag.name(), "READ");

    let flag = ACCESS::rw() ^ ACCESS::read();
    assert_eq!(flag.value(), 0x02);
    assert_eq!(flag.name(), "WRITE");
}
