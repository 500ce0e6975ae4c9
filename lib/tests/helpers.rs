#![allow(unused)]

use std::str::FromStr;

use log::LevelFilter;
use simplelog::SimpleLogger;

use pintan::DialogHandle;
use pintan_core::passport::{Config, Passport};
use pintan_proto::prelude::*;
use pintan_tests::{bank::MockBank, driver::TestDriver};

/// Setup test logging, `LOG_LEVEL` overrides the default debug level
pub fn setup() {
    let log_level = match std::env::var("LOG_LEVEL").map(|v| LevelFilter::from_str(&v)) {
        Ok(Ok(l)) => l,
        _ => LevelFilter::Debug,
    };

    let _ = SimpleLogger::init(log_level, Default::default());
}

/// Create a dialog handle against the provided mock bank
pub fn handle<'a>(
    bank: &'a MockBank,
    bpd: Data,
    enrolled: &[&str],
    drv: TestDriver,
    config: Config,
) -> DialogHandle<&'a MockBank, TestDriver> {
    let mut p = Passport::new(drv, config);
    p.set_bpd(bpd);
    p.set_enrolled(enrolled.iter().map(|s| s.to_string()));

    DialogHandle::new(bank, p)
}
