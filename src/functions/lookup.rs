//! Functions backed by external tables: `customreplace` and `color`

use super::{CallArgs, FunctionError};

/// `{{#customreplace: key | default }}`
///
/// A missing key yields the default when one is given, even an empty one,
/// and the key itself otherwise.
pub fn customreplace(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let key = args.eval(0);
    let replaced = args
        .ctx()
        .replacements
        .and_then(|r| r.get(&key))
        .map(str::to_string);
    Ok(match replaced {
        Some(value) => value,
        None if args.len() > 1 => args.eval(1),
        None => key,
    })
}

/// `{{#color: region | return name | include unused regions }}`
pub fn color(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let region = args.integer(0)?;
    let Ok(region) = usize::try_from(region) else {
        return Ok(String::new());
    };
    let ctx = args.ctx();

    let unused = ctx.species.is_some_and(|s| !s.region_used(region));
    if unused && args.eval_non_empty(2).is_none() {
        return Ok(String::new());
    }

    let Some(&id) = ctx.creature.colors.get(region) else {
        return Ok(String::new());
    };
    if args.eval_non_empty(1).is_some() {
        Ok(ctx.color_table().name(id).unwrap_or_default().to_string())
    } else {
        Ok(id.to_string())
    }
}
