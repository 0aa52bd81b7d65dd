//! Update function for the data-source settings page.
//!
//! Elm-style: every `Msg::Dispatch` goes through the headless state machine,
//! and each returned effect runs on `spawn_local`. The effect outcome comes
//! back as further `Msg::Dispatch` messages, or `Msg::Failed`.

use std::rc::Rc;

use yew::platform::spawn_local;
use yew::prelude::*;

use common::settings::{perform, Action, Effect, SettingsError};

use super::helpers::show_toast;
use super::messages::Msg;
use super::state::DataSourceItemComponent;

pub fn update(
    component: &mut DataSourceItemComponent,
    ctx: &Context<DataSourceItemComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Dispatch(action) => {
            if matches!(action, Action::Persisted) {
                component.saving = false;
                show_toast("Configuración guardada.");
            }

            match component.item.dispatch(action) {
                Ok(effects) => {
                    component.error = None;
                    for effect in effects {
                        run_effect(component, ctx, effect);
                    }
                    true
                }
                Err(cause) => fail(component, cause),
            }
        }
        Msg::Failed(cause) => fail(component, cause),
        Msg::Refresh => {
            run_effect(component, ctx, Effect::LoadSources { force_refresh: true });
            false
        }
    }
}

fn run_effect(
    component: &mut DataSourceItemComponent,
    ctx: &Context<DataSourceItemComponent>,
    effect: Effect,
) {
    if matches!(effect, Effect::Persist(_)) {
        component.saving = true;
    }

    let services = Rc::clone(&component.services);
    let link = ctx.link().clone();
    spawn_local(async move {
        match perform(effect, services.as_ref()).await {
            Ok(actions) => link.send_message_batch(actions.into_iter().map(Msg::Dispatch).collect()),
            Err(cause) => link.send_message(Msg::Failed(cause)),
        }
    });
}

fn fail(component: &mut DataSourceItemComponent, cause: SettingsError) -> bool {
    log::error!("Data-source settings failed: {cause}");
    show_toast(&format!("Error: {cause}"));
    component.saving = false;
    component.error = Some(cause.to_string());
    true
}
