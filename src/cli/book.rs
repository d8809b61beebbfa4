//! Interactive booking wizard.

use super::account::require_session;
use super::output::Output;
use super::prompt::{is_back, Prompter};
use crate::{AppState, Result, ViewDriver};
use homehelp_core::{
    catalog, BookingFlow, BookingRequest, BookingStep, Route, ServiceCategory, Urgency,
};
use chrono::NaiveDate;
use tokio::io::AsyncBufRead;

/// Walk the customer through the four booking steps.
///
/// Returns the confirmed request, or `None` when the guard redirected to
/// login or the input ran out before confirmation.
pub async fn run<R: AsyncBufRead + Unpin>(
    state: &AppState,
    service: Option<&str>,
    category: Option<ServiceCategory>,
    prompter: &mut Prompter<R>,
    output: &Output,
) -> Result<Option<BookingRequest>> {
    if !require_session(state, &Route::BookService, output) {
        return Ok(None);
    }

    let timings = state.timings();
    let flow = match service {
        Some(service) => {
            let category = category
                .or_else(|| catalog::category_of(service))
                .unwrap_or_default();
            BookingFlow::prefilled(service, category, timings)
        }
        None => {
            let mut flow = BookingFlow::new(timings);
            if let Some(category) = category {
                flow.select_category(category)?;
            }
            flow
        }
    };
    let driver = ViewDriver::mount(flow);

    output.header("Book a Service");
    loop {
        let step = driver.with(|f| f.step());
        output.progress(&catalog::STEP_LABELS, step.index());
        let answered = match step {
            BookingStep::SelectingService => service_step(&driver, prompter, output).await?,
            BookingStep::EnteringLocation => location_step(&driver, prompter, output).await?,
            BookingStep::EnteringDetails => details_step(&driver, prompter, output).await?,
            BookingStep::Confirmed => break,
        };
        if !answered {
            output.warning("Booking cancelled");
            return Ok(None);
        }
    }

    let request = driver.with(|f| f.request().cloned());
    if let Some(summary) = driver.with(|f| f.summary()) {
        output.success("Request submitted");
        for (label, value) in summary {
            output.kv(label, &value);
        }
    }

    output.info("Redirecting to your dashboard...");
    let mut fired = driver.subscribe();
    loop {
        if let Some(route) = driver.with(|f| f.redirect()) {
            output.kv("Page", &route.path());
            break;
        }
        if fired.changed().await.is_err() {
            break;
        }
    }
    Ok(request)
}

/// One pass over the service step. `false` when input is exhausted.
async fn service_step<R: AsyncBufRead + Unpin>(
    driver: &ViewDriver<BookingFlow>,
    prompter: &mut Prompter<R>,
    output: &Output,
) -> Result<bool> {
    let (category, services, preselected) = driver.with(|f| {
        (f.draft().category, f.services(), f.draft().service.clone())
    });
    output.subheader(&format!("{} services", category.label()));
    for (i, service) in services.iter().enumerate() {
        output.choice(i + 1, service);
    }
    output.hint("Type a number or a service name, or 'c' to switch category");

    let question = if preselected.is_empty() {
        "Service:".to_string()
    } else {
        format!("Service [{}]:", preselected)
    };
    let Some(answer) = prompter.ask(output, &question).await? else {
        return Ok(false);
    };

    let result = if answer.eq_ignore_ascii_case("c") {
        let other = match category {
            ServiceCategory::Professional => ServiceCategory::Casual,
            ServiceCategory::Casual => ServiceCategory::Professional,
        };
        driver.update(|f, _| f.select_category(other))
    } else {
        let choice = match answer.parse::<usize>() {
            Ok(n) if (1..=services.len()).contains(&n) => services[n - 1].to_string(),
            _ if answer.is_empty() => preselected,
            _ => answer,
        };
        driver.update(|f, _| f.select_service(&choice))
    };
    if let Err(e) = result {
        output.error(&e.to_string());
    }
    Ok(true)
}

async fn location_step<R: AsyncBufRead + Unpin>(
    driver: &ViewDriver<BookingFlow>,
    prompter: &mut Prompter<R>,
    output: &Output,
) -> Result<bool> {
    let service = driver.with(|f| f.draft().service.clone());
    output.subheader(&format!("Where do you need {}?", service));

    let Some(location) = prompter.ask(output, "City and state:").await? else {
        return Ok(false);
    };
    if is_back(&location) {
        return go_back(driver, output);
    }
    let Some(address) = prompter.ask(output, "Complete address:").await? else {
        return Ok(false);
    };
    if is_back(&address) {
        return go_back(driver, output);
    }

    if let Err(e) = driver.update(|f, _| f.submit_location(&location, &address)) {
        output.error(&e.to_string());
    }
    Ok(true)
}

async fn details_step<R: AsyncBufRead + Unpin>(
    driver: &ViewDriver<BookingFlow>,
    prompter: &mut Prompter<R>,
    output: &Output,
) -> Result<bool> {
    output.subheader("What happens next");
    for line in catalog::NEXT_STEPS {
        output.list_item(line);
    }

    let Some(description) = prompter.ask(output, "Describe the job:").await? else {
        return Ok(false);
    };
    if is_back(&description) {
        return go_back(driver, output);
    }

    for urgency in Urgency::ALL {
        output.list_item(&format!("{} - {}", urgency, urgency.description()));
    }
    let Some(urgency) = prompter.ask(output, "Urgency [medium]:").await? else {
        return Ok(false);
    };
    let urgency = if urgency.is_empty() {
        Urgency::default()
    } else {
        match urgency.parse::<Urgency>() {
            Ok(urgency) => urgency,
            Err(e) => {
                output.error(&e);
                return Ok(true);
            }
        }
    };

    let Some(date) = prompter
        .ask(output, "Preferred date (YYYY-MM-DD, blank for flexible):")
        .await?
    else {
        return Ok(false);
    };
    let preferred = if date.is_empty() {
        None
    } else {
        match NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                output.error(&format!("'{}' is not a date like 2025-01-31", date));
                return Ok(true);
            }
        }
    };

    let submitted = driver.update(|f, now| {
        f.submit_details(&description, urgency, preferred, now)
            .map(|_| ())
    });
    if let Err(e) = submitted {
        output.error(&e.to_string());
    }
    Ok(true)
}

fn go_back(driver: &ViewDriver<BookingFlow>, output: &Output) -> Result<bool> {
    if let Err(e) = driver.update(|f, _| f.back()) {
        output.error(&e.to_string());
    }
    Ok(true)
}
