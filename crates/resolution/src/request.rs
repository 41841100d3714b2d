use content_source::Instance;

use crate::ResolveError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub instance: Instance,
    pub path: String,
}

/// What the caller wants resolved. Exactly one of `id` and `alias` must be
/// set; anything else is a caller error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionRequest {
    pub id: Option<i64>,
    pub alias: Option<Alias>,
}

impl ResolutionRequest {
    pub fn by_id(id: i64) -> ResolutionRequest {
        ResolutionRequest {
            id: Some(id),
            alias: None,
        }
    }

    pub fn by_alias(instance: Instance, path: impl Into<String>) -> ResolutionRequest {
        ResolutionRequest {
            id: None,
            alias: Some(Alias {
                instance,
                path: path.into(),
            }),
        }
    }

    pub(crate) fn target(&self) -> Result<Target<'_>, ResolveError> {
        match (self.id, &self.alias) {
            (Some(id), None) => Ok(Target::Id(id)),
            (None, Some(alias)) => Ok(Target::Alias(alias)),
            _ => Err(ResolveError::InvalidRequest),
        }
    }
}

pub(crate) enum Target<'a> {
    Id(i64),
    Alias(&'a Alias),
}
