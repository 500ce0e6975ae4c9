// Copyright (c) 2026 The pintan Developers

//! Insertion of `HKTAN` tasks for business tasks requiring a TAN

use alloc::vec::Vec;

use pintan_proto::prelude::*;

use super::{Driver, Error, PinTanInfo, Passport, TanMethod};
use crate::dialog::{DialogContext, MessageQueue, Task, TaskId, TanRequest};

/// First `HKTAN` version carrying an order account
const MIN_ORDER_ACCOUNT_SEG_VERSION: u32 = 5;

impl<DRV: Driver> Passport<DRV> {
    /// Patch the queued messages of a dialog for the current two-step method
    pub(crate) fn patch_queue(&mut self, ctx: &mut DialogContext) -> Result<(), Error> {
        let queue = match ctx.queue.as_mut() {
            Some(q) => q,
            None => return Ok(()),
        };

        self.patch_messages(queue)
    }

    /// Insert TAN requests into `queue` according to the process variant
    /// of the current method
    pub fn patch_messages(&mut self, queue: &mut MessageQueue) -> Result<(), Error> {
        let current = self.current_method(false)?;
        if current == ONE_STEP_METHOD {
            return Ok(());
        }

        let method = match self.catalog.get(&current) {
            Some(m) => m.clone(),
            None => {
                #[cfg(feature = "log")]
                log::error!("no parameters for TAN method {}", current);
                return Err(Error::UnsupportedMethod);
            }
        };

        #[cfg(feature = "log")]
        log::debug!(
            "patching messages for TAN method {} (HKTAN{}, variant {})",
            current,
            method.seg_version,
            method.variant()
        );

        let mut index = 0;
        while index < queue.messages().len() {
            let mut current_index = index;
            let mut inserted_after = 0;

            // Tasks added while patching are not revisited
            let ids: Vec<TaskId> = queue.messages()[index].tasks.clone();

            for id in ids {
                let task = match queue.task(id) {
                    Some(t) if !t.tan_applied => t,
                    _ => continue,
                };

                if self.pin_tan_info(&task.code) != PinTanInfo::Required {
                    #[cfg(feature = "log")]
                    log::debug!("task {} ({}) requires no TAN", id, task.code);
                    continue;
                }

                #[cfg(feature = "log")]
                log::debug!("task {} ({}) requires a TAN", id, task.code);

                match method.variant() {
                    ProcessVariant::One => {
                        let tan = self.tan_request_p1(task, &method)?;

                        // Request ahead of the business task, in a message of its own
                        let m = queue.insert_before(current_index);
                        queue.append(m, tan);
                        current_index += 1;
                    }
                    ProcessVariant::Two => {
                        let (step1, step2) = self.tan_requests_p2(id, task, &method);

                        // Step two follows in a message of its own
                        let step2 = queue.alloc(step2);
                        let mut step1 = step1;
                        if let Some(r) = step1.tan_request_mut() {
                            r.step2 = Some(step2);
                        }

                        queue.append(current_index, step1);
                        let m = queue.insert_after(current_index);
                        queue.attach(m, step2);
                        inserted_after += 1;
                    }
                }

                if let Some(t) = queue.task_mut(id) {
                    t.tan_applied = true;
                }
            }

            index = current_index + 1 + inserted_after;
        }

        Ok(())
    }

    /// Build a process variant 1 request carrying the order hash of `task`
    fn tan_request_p1(&mut self, task: &Task, method: &TanMethod) -> Result<Task, Error> {
        let seg_version = method.seg_version;

        let mut req = TanRequest::new(TanProcess::Process1);
        req.order_seg_code = task.code.clone();
        req.tan_media = self.tan_media(seg_version, Some(method));

        if seg_version >= MIN_ORDER_ACCOUNT_SEG_VERSION && method.needs_order_account() {
            match &task.order_account {
                Some(a) => req.order_account = Some(a.clone()),
                None => {
                    #[cfg(feature = "log")]
                    log::warn!("order account required but missing in {}", task.code);
                }
            }
        }

        if method.needs_challenge_class() {
            if let Some(p) = self.drv.challenge_params(task, method)? {
                req.challenge_class = p.class;
                req.challenge_params = p.params;
            }
        }

        let segment = self.drv.encode_segment(task)?;
        let mode = self.order_hash_mode(seg_version)?;
        req.order_hash = Some(mode.digest(&segment));

        let mut tan = Task::tan(seg_version, req);
        tan.external_id = task.external_id.clone();

        Ok(tan)
    }

    /// Build the process variant 2 step one and step two requests for `task`
    fn tan_requests_p2(&mut self, id: TaskId, task: &Task, method: &TanMethod) -> (Task, Task) {
        let seg_version = method.seg_version;

        let mut req1 = TanRequest::new(TanProcess::Process2Step1);
        req1.order_seg_code = task.code.clone();
        req1.tan_media = self.tan_media(seg_version, Some(method));

        let mut step1 = Task::tan(seg_version, req1);
        step1.external_id = task.external_id.clone();

        // Step two answers for the business task
        let mut req2 = TanRequest::new(TanProcess::Process2Step2);
        req2.task = Some(id);

        let mut step2 = Task::tan(seg_version, req2);
        step2.external_id = task.external_id.clone();

        (step1, step2)
    }
}
