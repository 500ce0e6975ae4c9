//! Strong customer authentication during dialog initialisation

use pintan_core::{
    dialog::{DialogContext, MessageQueue, Task},
    passport::DialogEvent,
};
use pintan_proto::prelude::*;
use pintan_tests::{
    bpd::{self, BpdBuilder, Method, SMS_TAN_V4},
    driver::TestDriver,
    reply,
};

mod helpers;
use helpers::*;

const PHOTO_TAN: Method = Method {
    id: "902",
    name: "photoTAN",
    version: 7,
    process: "1",
    attrs: &[("needtanmedia", "2")],
};

fn field<'a>(ctx: &'a DialogContext, path: &str) -> Option<&'a str> {
    ctx.init.as_ref().and_then(|i| i.fields.get(path))
}

#[test]
fn two_step_init() -> anyhow::Result<()> {
    setup();

    let mut p = passport(bpd::two_step_bpd(), TestDriver::new());
    p.set_enrolled(["912".to_string()]);

    // Step one, HKTAN referencing the identification
    let mut ctx = DialogContext::new(DialogTemplate::Init);
    p.update(DialogEvent::MessageCreated, &mut ctx)?;

    assert_eq!(ctx.sca, Some(ScaStep::Step1));
    assert_eq!(field(&ctx, "TAN2Step6"), Some("requested"));
    assert_eq!(field(&ctx, "TAN2Step6.process"), Some("4"));
    assert_eq!(field(&ctx, "TAN2Step6.ordersegcode"), Some("HKIDN"));
    assert_eq!(field(&ctx, "TAN2Step6.orderhash"), Some("B00000000"));
    assert_eq!(field(&ctx, "TAN2Step6.challengeklass"), Some(""));
    assert_eq!(field(&ctx, "TAN2Step6.orderref"), Some(""));
    assert_eq!(field(&ctx, "TAN2Step6.OrderAccount.iban"), Some(""));

    // Challenge received, initialisation repeated
    deliver(&mut p, &mut ctx, reply::sca_challenge(6, "Bitte TAN eingeben", "ORDER-1"))?;

    assert_eq!(ctx.sca, Some(ScaStep::Step2));
    assert_eq!(ctx.template(), Some(DialogTemplate::InitSca));
    assert!(ctx.take_repeat());

    let c = p.challenge_data();
    assert_eq!(c.challenge(), Some("Bitte TAN eingeben"));
    assert_eq!(c.challenge_hhd_uc(), None);
    assert_eq!(c.order_ref(), Some("ORDER-1"));

    // Step two carries the order reference
    if let Some(i) = ctx.init.as_mut() {
        i.fields.clear();
    }
    p.update(DialogEvent::MessageCreated, &mut ctx)?;

    assert_eq!(field(&ctx, "TAN2Step6.process"), Some("2"));
    assert_eq!(field(&ctx, "TAN2Step6.orderref"), Some("ORDER-1"));

    deliver(&mut p, &mut ctx, reply::ok())?;
    assert_eq!(ctx.sca, None);
    assert!(!ctx.take_repeat());

    Ok(())
}

#[test]
fn no_challenge_yet() -> anyhow::Result<()> {
    setup();

    let mut p = passport(bpd::two_step_bpd(), TestDriver::new());
    p.set_enrolled(["921".to_string()]);

    let mut ctx = DialogContext::new(DialogTemplate::Init);
    p.update(DialogEvent::MessageCreated, &mut ctx)?;
    deliver(&mut p, &mut ctx, reply::ok())?;

    // Treated as a regular reply
    assert_eq!(ctx.sca, Some(ScaStep::Step1));
    assert_eq!(ctx.template(), Some(DialogTemplate::Init));
    assert!(!ctx.take_repeat());
    assert!(p.challenge_data().is_empty());

    Ok(())
}

#[test]
fn exemption() -> anyhow::Result<()> {
    setup();

    let mut p = passport(bpd::two_step_bpd(), TestDriver::new());
    p.set_enrolled(["912".to_string()]);

    let mut ctx = DialogContext::new(DialogTemplate::Init);
    p.update(DialogEvent::MessageCreated, &mut ctx)?;
    assert_eq!(ctx.sca, Some(ScaStep::Step1));

    let data = reply::ReplyBuilder::new()
        .global("0010", "Nachricht entgegengenommen.", &[])
        .segment("5", "3076", "Keine starke Authentifizierung erforderlich.", &[])
        .tan_response(6, Some("ignored"), None, "ORDER-X")
        .build();
    deliver(&mut p, &mut ctx, data)?;

    assert_eq!(ctx.sca, None);
    assert!(!ctx.take_repeat());
    assert!(p.challenge_data().is_empty());

    Ok(())
}

#[test]
fn anonymous_dialogs() -> anyhow::Result<()> {
    setup();

    let mut p = passport(bpd::two_step_bpd(), TestDriver::new());
    p.set_enrolled(["912".to_string()]);

    let mut ctx = DialogContext::new(DialogTemplate::InitAnon);
    assert!(ctx.anonymous);

    p.update(DialogEvent::MessageCreated, &mut ctx)?;
    assert_eq!(ctx.sca, None);
    assert_eq!(field(&ctx, "TAN2Step6"), None);

    // Anonymous passport drops a pending negotiation
    p.set_anonymous(true);
    let mut ctx = DialogContext::new(DialogTemplate::Init);
    ctx.sca = Some(ScaStep::Step1);
    deliver(&mut p, &mut ctx, reply::sca_challenge(6, "challenge", "ORDER-1"))?;

    assert_eq!(ctx.sca, None);
    assert!(!ctx.take_repeat());
    assert!(p.challenge_data().is_empty());

    Ok(())
}

#[test]
fn legacy_segment_version() -> anyhow::Result<()> {
    setup();

    let bpd = BpdBuilder::new().pin_tan(false).method(&SMS_TAN_V4).build();
    let mut p = passport(bpd, TestDriver::new());
    p.set_enrolled([SMS_TAN_V4.id.to_string()]);

    let mut ctx = DialogContext::new(DialogTemplate::Init);
    p.update(DialogEvent::MessageCreated, &mut ctx)?;

    assert_eq!(ctx.sca, None);
    assert!(ctx.init.map(|i| i.fields.is_empty()).unwrap_or(false));

    Ok(())
}

#[test]
fn variant_one_and_media() -> anyhow::Result<()> {
    setup();

    let bpd = BpdBuilder::new().pin_tan(false).method(&PHOTO_TAN).build();

    // Media provided by the user, pre-filled from user parameters
    let mut p = passport(bpd.clone(), TestDriver::new().with_media("Mein Handy"));
    p.set_upd(bpd::upd_with_media("Altes Handy"));
    p.set_enrolled(["902".to_string()]);

    let mut ctx = DialogContext::new(DialogTemplate::Init);
    p.update(DialogEvent::MessageCreated, &mut ctx)?;

    assert_eq!(field(&ctx, "TAN2Step7.process"), Some("1"));
    assert_eq!(field(&ctx, "TAN2Step7.orderhash"), Some(""));
    assert_eq!(field(&ctx, "TAN2Step7.challengeklass"), Some("99"));
    assert_eq!(field(&ctx, "TAN2Step7.tanmedia"), Some("Mein Handy"));
    assert_eq!(p.drv().media_prompts, ["Altes Handy"]);

    // No media provided
    let mut p = passport(bpd, TestDriver::new());
    p.set_enrolled(["902".to_string()]);

    let mut ctx = DialogContext::new(DialogTemplate::Init);
    p.update(DialogEvent::MessageCreated, &mut ctx)?;

    assert_eq!(field(&ctx, "TAN2Step7.tanmedia"), Some("noref"));
    assert_eq!(p.drv().media_prompts, [""]);

    Ok(())
}

#[test]
fn admin_segment_reference() -> anyhow::Result<()> {
    setup();

    let mut p = passport(bpd::two_step_bpd(), TestDriver::new());
    p.set_enrolled(["912".to_string()]);

    let mut queue = MessageQueue::new();
    queue.push(Task::business("HKTAB", 5));

    let mut ctx = DialogContext::new(DialogTemplate::Init);
    ctx.queue = Some(queue);
    p.update(DialogEvent::MessageCreated, &mut ctx)?;

    assert_eq!(field(&ctx, "TAN2Step6.ordersegcode"), Some("HKTAB"));

    Ok(())
}
