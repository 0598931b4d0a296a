use super::messages::Msg;
use super::state::Scanner;
use common::model::product::{Nutrition, ScanResult};
use common::store::scan::ScanState;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

pub fn view(scanner: &Scanner, ctx: &Context<Scanner>) -> Html {
    let link = ctx.link();
    let Some(context) = &scanner.context else {
        return html! {};
    };
    let scan = &context.scan;

    html! {
        <section class="scanner">
            { build_form(scanner, scan, link) }
            {
                match &scan.current_scan {
                    Some(current) => build_product_card(current, link),
                    None => html! {},
                }
            }
            { build_history(scan, link) }
        </section>
    }
}

fn build_form(scanner: &Scanner, scan: &ScanState, link: &Scope<Scanner>) -> Html {
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });
    let oninput = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::UpdateInput(input.value())
    });
    let message = scanner.input_error.as_ref().or(scan.error.as_ref());

    html! {
        <form class="scanner-form" {onsubmit}>
            <input
                type="text"
                inputmode="numeric"
                placeholder="Barcode"
                value={scanner.input.clone()}
                {oninput}
            />
            <button type="submit" disabled={scan.is_loading}>{"Find"}</button>
            if scan.is_loading {
                <span class="spinner">{"Searching..."}</span>
            }
            if let Some(message) = message {
                <p class="error">{ message.clone() }</p>
            }
        </form>
    }
}

fn build_product_card(product: &ScanResult, link: &Scope<Scanner>) -> Html {
    let title = if product.product_name.is_empty() {
        "Unknown product".to_string()
    } else {
        product.product_name.clone()
    };

    html! {
        <article class="product-card">
            <header>
                <h2>{ title }</h2>
                <button onclick={link.callback(|_| Msg::ClearCurrent)}>{"Close"}</button>
            </header>
            <p class="barcode">{ product.barcode.clone() }</p>
            if let Some(manufacturer) = &product.manufacturer {
                <p class="manufacturer">{ manufacturer.clone() }</p>
            }
            <p class="score">{ score_label(product.score) }</p>
            if let Some(allergens) = &product.allergens {
                <p class="allergens">{ format!("Allergens: {}", allergens) }</p>
            }
            if let Some(nutrition) = &product.nutrition {
                { build_nutrition(nutrition) }
            }
            if let Some(image) = &product.image_front {
                <img class="image-front" src={image.clone()} alt="Front of package" />
            }
        </article>
    }
}

fn build_nutrition(nutrition: &Nutrition) -> Html {
    let rows = [
        ("Proteins", nutrition.proteins),
        ("Fats", nutrition.fats),
        ("Carbohydrates", nutrition.carbohydrates),
        ("Calories", nutrition.calories),
        ("kcal", nutrition.kcal),
    ];
    html! {
        <table class="nutrition">
            { for rows.iter().map(|(label, value)| html! {
                <tr>
                    <td>{ *label }</td>
                    <td>{ value.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v)) }</td>
                </tr>
            }) }
        </table>
    }
}

fn build_history(scan: &ScanState, link: &Scope<Scanner>) -> Html {
    html! {
        <aside class="history">
            <header>
                <h3>{ format!("History ({})", scan.scan_history.len()) }</h3>
                <button onclick={link.callback(|_| Msg::ReloadHistory)}>{"Reload"}</button>
            </header>
            if scan.has_scan_history() {
                <ul>
                    { for scan.scan_history.iter().map(|item| history_entry(item, link)) }
                </ul>
            } else {
                <p class="empty">{"No scans yet"}</p>
            }
        </aside>
    }
}

fn history_entry(item: &ScanResult, link: &Scope<Scanner>) -> Html {
    let selected = item.clone();
    html! {
        <li key={item.barcode.clone()} onclick={link.callback(move |_| Msg::Select(selected.clone()))}>
            <span class="name">{ item.product_name.clone() }</span>
            <span class="barcode">{ item.barcode.clone() }</span>
            <span class="score">{ score_label(item.score) }</span>
        </li>
    }
}

fn score_label(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("Score: {}", score),
        None => "Score: n/a".to_string(),
    }
}
