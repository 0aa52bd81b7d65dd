//! View rendering for the data-source settings page.
//!
//! The form is rendered from the provider metadata: one input per
//! `control_options` descriptor, and when the provider binds a survey, a
//! survey selector plus one attribute selector per inbound field.
//!
//! Notes
//! - User-facing labels are in Spanish.
//! - Controls failing their validators get the `invalid` class and keep the
//!   save button disabled.

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use common::model::datasource::{ControlDescriptor, DataSourceBinding};
use common::model::survey::SurveyId;
use common::settings::form::{FieldValue, FormControl};
use common::settings::state::FORM_ID_CONTROL;
use common::settings::{Action, DataSourceItem};

use super::messages::Msg;
use super::state::DataSourceItemComponent;

pub fn view(component: &DataSourceItemComponent, ctx: &Context<DataSourceItemComponent>) -> Html {
    let link = ctx.link();
    let item = &component.item;

    let Some(provider) = item.provider() else {
        return html! {
            <div class="data-source-item">
                {
                    match &component.error {
                        Some(error) => html! { <p class="error">{ error.clone() }</p> },
                        None => html! { <p class="loading">{ "Cargando fuentes de datos..." }</p> },
                    }
                }
            </div>
        };
    };

    html! {
        <div class="data-source-item">
            { build_header(component, provider, link) }
            { build_provider_selector(item, link) }
            <div class="data-source-form">
                { for provider.control_options.iter().map(|descriptor| build_option_field(item, descriptor, link)) }
                { build_survey_section(item, provider, link) }
            </div>
            { build_actions(component, link) }
        </div>
    }
}

/// Provider name and the connect/disconnect switch.
fn build_header(
    component: &DataSourceItemComponent,
    provider: &DataSourceBinding,
    link: &Scope<DataSourceItemComponent>,
) -> Html {
    let onchange = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::Dispatch(Action::Toggle { checked: input.checked() })
    });

    html! {
        <div class="data-source-header">
            <h2>{ provider.name.clone() }</h2>
            <label class="switch">
                <input
                    type="checkbox"
                    checked={provider.available_provider}
                    disabled={component.saving}
                    {onchange}
                />
                <span>{ if provider.available_provider { "Conectado" } else { "Desconectado" } }</span>
            </label>
        </div>
    }
}

/// Provider picker, only offered while creating a new data source.
fn build_provider_selector(item: &DataSourceItem, link: &Scope<DataSourceItemComponent>) -> Html {
    if !item.on_creating() || item.available_providers().is_empty() {
        return html! {};
    }

    let current = item.provider().map(|provider| provider.id.clone()).unwrap_or_default();
    let onchange = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::Dispatch(Action::SelectProvider(Some(select.value())))
    });

    html! {
        <label class="field">
            <span>{ "Proveedor" }</span>
            <select {onchange}>
                { for item.available_providers().iter().map(|provider| html! {
                    <option value={provider.id.clone()} selected={provider.id == current}>
                        { provider.name.clone() }
                    </option>
                }) }
            </select>
        </label>
    }
}

fn build_option_field(
    item: &DataSourceItem,
    descriptor: &ControlDescriptor,
    link: &Scope<DataSourceItemComponent>,
) -> Html {
    let Some(control) = item.form().control(&descriptor.control_label) else {
        return html! {};
    };

    let name = control.name.clone();
    let input = match &control.value {
        FieldValue::Bool(checked) => {
            let onchange = link.callback(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                Msg::Dispatch(Action::PatchField {
                    name: name.clone(),
                    value: FieldValue::Bool(input.checked()),
                })
            });
            html! { <input type="checkbox" checked={*checked} {onchange} /> }
        }
        value => {
            let template = descriptor.control_value.clone();
            let kind = if template.is_number() { "number" } else { "text" };
            let oninput = link.callback(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                Msg::Dispatch(Action::PatchField {
                    name: name.clone(),
                    value: FieldValue::from_input(input.value(), &template),
                })
            });
            html! { <input type={kind} value={value.display()} {oninput} /> }
        }
    };

    html! {
        <label class={field_classes(control)}>
            <span>{ field_label(control) }</span>
            { input }
        </label>
    }
}

/// Survey picker and the inbound-field attribute pickers.
fn build_survey_section(
    item: &DataSourceItem,
    provider: &DataSourceBinding,
    link: &Scope<DataSourceItemComponent>,
) -> Html {
    if !provider.visible_survey {
        return html! {};
    }

    let selected = item
        .form()
        .get(FORM_ID_CONTROL)
        .and_then(FieldValue::as_survey)
        .map(|survey| survey.id);
    let surveys = item.survey_list().to_vec();
    let onchange = link.callback(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        let survey = select
            .value()
            .parse::<SurveyId>()
            .ok()
            .and_then(|id| surveys.iter().find(|survey| survey.id == id).cloned());
        Msg::Dispatch(Action::SelectSurvey(survey))
    });

    html! {
        <fieldset class="survey-binding">
            <label class="field">
                <span>{ "Encuesta" }</span>
                <select {onchange}>
                    <option value="" selected={selected.is_none()}>{ "Seleccione una encuesta" }</option>
                    { for item.survey_list().iter().map(|survey| html! {
                        <option value={survey.id.to_string()} selected={Some(survey.id) == selected}>
                            { survey.title.clone() }
                        </option>
                    }) }
                </select>
            </label>
            { for provider.control_inbound_fields.iter().map(|descriptor| build_inbound_field(item, descriptor, link)) }
        </fieldset>
    }
}

fn build_inbound_field(
    item: &DataSourceItem,
    descriptor: &ControlDescriptor,
    link: &Scope<DataSourceItemComponent>,
) -> Html {
    let Some(control) = item.form().control(&descriptor.control_label) else {
        return html! {};
    };

    let current = control.value.as_text().unwrap_or_default().to_string();
    let name = control.name.clone();
    let onchange = link.callback(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        let key = select.value();
        let value = if key.is_empty() { FieldValue::Empty } else { FieldValue::Text(key) };
        Msg::Dispatch(Action::PatchField { name: name.clone(), value })
    });

    html! {
        <label class={field_classes(control)}>
            <span>{ field_label(control) }</span>
            <select {onchange} disabled={item.survey_attributes().is_empty()}>
                <option value="" selected={current.is_empty()}>{ "-" }</option>
                { for item.survey_attributes().iter().map(|attribute| html! {
                    <option value={attribute.key.clone()} selected={attribute.key == current}>
                        { attribute.key.clone() }
                    </option>
                }) }
            </select>
        </label>
    }
}

fn build_actions(component: &DataSourceItemComponent, link: &Scope<DataSourceItemComponent>) -> Html {
    let invalid = !component.item.form().is_valid();

    html! {
        <div class="data-source-actions">
            <button
                type="button"
                class="btn"
                disabled={component.saving}
                onclick={link.callback(|_| Msg::Refresh)}
            >
                { "Recargar" }
            </button>
            <button
                type="button"
                class="btn primary"
                disabled={component.saving || invalid}
                onclick={link.callback(|_| Msg::Dispatch(Action::Save))}
            >
                { "Guardar" }
            </button>
        </div>
    }
}

fn field_classes(control: &FormControl) -> Classes {
    classes!("field", (!control.is_valid()).then_some("invalid"))
}

fn field_label(control: &FormControl) -> String {
    if control.is_required() {
        format!("{} *", control.name)
    } else {
        control.name.clone()
    }
}
