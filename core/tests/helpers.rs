#![allow(unused)]

use log::LevelFilter;

use pintan_core::{
    dialog::DialogContext,
    passport::{Config, DialogEvent, Passport},
};
use pintan_proto::prelude::*;
use pintan_tests::driver::TestDriver;

/// Setup test logging
pub fn setup() {
    let _ = simplelog::SimpleLogger::init(LevelFilter::Debug, Default::default());
}

/// Create a passport with the provided bank parameters and driver
pub fn passport(bpd: Data, drv: TestDriver) -> Passport<TestDriver> {
    let mut p = Passport::new(drv, Config::default());
    p.set_bpd(bpd);
    p
}

/// Deliver a reply to the passport, as after a message exchange
pub fn deliver(
    p: &mut Passport<TestDriver>,
    ctx: &mut DialogContext,
    data: Data,
) -> anyhow::Result<()> {
    ctx.status = Some(ReplyStatus::parse(data));
    p.update(DialogEvent::MessageSent, ctx)?;
    Ok(())
}
