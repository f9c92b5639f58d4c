use crate::registry::{Deferred, Registry, Reveal};

/// Apply `candidate` to the option called `name`.
///
/// The value is stored provisionally and every validator is asked about it.
/// A rejection restores the previous value and skips the unlock handlers.
/// Otherwise each pending unlock handler runs once; handlers that report new
/// options are dropped. Returns `true` if any handler reported new options.
pub(crate) fn commit(
    registry: &mut Registry,
    deferred: &mut Vec<Deferred>,
    name: &str,
    candidate: &str,
) -> bool {
    let Some(option) = registry.get_mut(name) else {
        return false;
    };

    let previous = option.current_value.replace(candidate.to_string());
    let accepted = option
        .set_value_callbacks
        .iter_mut()
        .all(|validate| validate(candidate));
    if !accepted {
        option.current_value = previous;
        tracing::debug!(option = name, value = candidate, "value rejected");
        return false;
    }

    let mut handlers = std::mem::take(&mut option.unlock_callbacks);
    if handlers.is_empty() {
        return false;
    }

    let mut unlocked = false;
    {
        let mut reveal = Reveal::new(registry, deferred);
        handlers.retain_mut(|handler| {
            let consumed = handler(candidate, &mut reveal);
            unlocked |= consumed;
            !consumed
        });
    }

    if unlocked {
        tracing::debug!(option = name, value = candidate, "unlock handler consumed");
    }
    if let Some(option) = registry.get_mut(name) {
        option.unlock_callbacks = handlers;
    }
    unlocked
}
