use leptos::prelude::*;
use thaw::*;

use super::cart_ledger::parse_amount;
use super::cart_totals::change_due;
use crate::shared::number_format::format_money;

/// Cash payment. Confirm stays disabled until the tendered amount covers
/// the amount due.
#[component]
pub fn PaymentDialog(
    open: RwSignal<bool>,
    amount_due: Signal<f64>,
    on_confirm: Callback<()>,
) -> impl IntoView {
    let tendered = RwSignal::new(String::new());

    // each opening starts from a blank field
    Effect::new(move |_| {
        if open.get() {
            tendered.set(String::new());
        }
    });

    let change = Memo::new(move |_| {
        parse_amount(&tendered.get()).and_then(|t| change_due(amount_due.get(), t))
    });

    let confirm = move || {
        if change.get_untracked().is_some() {
            on_confirm.run(());
            open.set(false);
        }
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Cobrar venta"</DialogTitle>
                    <DialogContent>
                        <div class="payment">
                            <div class="payment__row">
                                <span>"Total a pagar"</span>
                                <strong>{move || format_money(amount_due.get())}</strong>
                            </div>
                            <div class="payment__row">
                                <span>"Recibido"</span>
                                <Input value=tendered placeholder="0,00"/>
                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| tendered.set(amount_due.get_untracked().to_string())
                                >
                                    "Exacto"
                                </Button>
                            </div>
                            <div class="payment__row">
                                <span>"Cambio"</span>
                                <strong>
                                    {move || match change.get() {
                                        Some(c) => format_money(c),
                                        None => "-".to_string(),
                                    }}
                                </strong>
                            </div>
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| open.set(false)
                        >
                            "Cancelar"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || change.get().is_none())
                            on_click=move |_| confirm()
                        >
                            "Confirmar pago"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
