use syn::{GenericArgument, Ident, PathArguments, Type};

/// If `ty` is a plain path type whose last segment is `wrapper` with exactly one generic type
/// argument (e.g. `Option<T>` or `std::option::Option<T>`), returns that argument.
pub(crate) fn single_type_argument<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };

    if path.qself.is_some() {
        return None;
    }

    let segment = path.path.segments.last()?;

    if segment.ident != wrapper {
        return None;
    }

    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };

    if arguments.args.len() != 1 {
        return None;
    }

    match arguments.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

/// Whether `ty` names the type being derived, either as `Self` or by its own identifier.
///
/// Generic arguments on the identifier form are not inspected here. A mismatch there
/// surfaces as a type error in the generated impl.
pub(crate) fn names_self(ty: &Type, self_ident: &Ident) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    if path.qself.is_some() || path.path.leading_colon.is_some() {
        return false;
    }

    let mut segments = path.path.segments.iter();

    match (segments.next(), segments.next()) {
        (Some(segment), None) => segment.ident == "Self" || segment.ident == *self_ident,
        _ => false,
    }
}
