//! Workflow del pannello admin composti da più chiamate HTTP

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::{Credentials, Order, OrderStatus};
use crate::sales::sort_by_date_desc;
use tracing::{info, instrument, warn};

/// Esito dell'assegnazione di un rider
#[derive(Debug, Clone)]
pub enum AssignOutcome {
    /// Il rider è stato assegnato.
    ///
    /// `order` è il dettaglio riletto, oppure l'ordine restituito dalla PUT se la
    /// rilettura fallisce. `orders` è `None` quando la lista non è stata riletta:
    /// il chiamante continua a mostrare quella che ha.
    Assigned { order: Order, orders: Option<Vec<Order>> },
    /// L'assegnazione è fallita: il chiamante tiene lo stato che aveva
    Unchanged,
}

/// Rifiuta le modifiche a un ordine consegnato
fn ensure_not_delivered(order: &Order) -> Result<(), ClientError> {
    if order.status == OrderStatus::Delivered {
        warn!("Order {} is delivered, status change refused", order.id);
        return Err(ClientError::DeliveredLocked);
    }
    Ok(())
}

/// Cambia lo stato di un ordine e restituisce la lista aggiornata, dal più recente.
///
/// `orders` è la lista che il chiamante sta mostrando: se lì l'ordine risulta già
/// consegnato non parte nessuna richiesta. L'ordine viene poi riletto, modificato solo
/// nello stato e rimandato per intero insieme alla `version` letta, così una modifica
/// concorrente produce un errore 409 invece di essere sovrascritta.
#[instrument(skip(api, creds, orders), fields(status = %status))]
pub async fn change_order_status(
    api: &ApiClient,
    creds: &Credentials,
    orders: &[Order],
    order_id: &str,
    status: OrderStatus,
) -> Result<Vec<Order>, ClientError> {
    if let Some(known) = orders.iter().find(|o| o.id == order_id) {
        ensure_not_delivered(known)?;
    }

    let mut order = api.get_order(creds, order_id).await?;
    ensure_not_delivered(&order)?;

    order.status = status;
    let updated = api.replace_order(creds, &order).await?;
    info!("Order {} is now {} (version {})", updated.id, updated.status, updated.version);

    let mut refreshed = api.list_orders(creds).await?;
    sort_by_date_desc(&mut refreshed);
    Ok(refreshed)
}

/// Assegna un rider e rilegge lista e dettaglio dell'ordine.
///
/// Nessuna delle tre chiamate propaga errori: ogni fallimento viene loggato e al
/// chiamante resta l'ultimo stato valido che conosce.
#[instrument(skip(api, creds))]
pub async fn assign_rider(
    api: &ApiClient,
    creds: &Credentials,
    order_id: &str,
    rider_id: &str,
) -> AssignOutcome {
    let assigned = match api.assign_rider(creds, order_id, rider_id).await {
        Ok(order) => order,
        Err(err) => {
            warn!("Failed to assign rider {} to order {}: {}", rider_id, order_id, err);
            return AssignOutcome::Unchanged;
        }
    };
    info!("Rider {} assigned to order {}", rider_id, order_id);

    let orders = match api.list_orders(creds).await {
        Ok(mut orders) => {
            sort_by_date_desc(&mut orders);
            Some(orders)
        }
        Err(err) => {
            warn!("Failed to refresh orders after assigning order {}: {}", order_id, err);
            None
        }
    };

    let order = match api.get_order(creds, order_id).await {
        Ok(order) => order,
        Err(err) => {
            warn!("Failed to reload order {}: {}", order_id, err);
            assigned
        }
    };

    AssignOutcome::Assigned { order, orders }
}
