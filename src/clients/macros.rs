/// Single-record reads for a resource client.
///
/// `get_<name>` maps a 404 to `Ok(None)`. `fetch_<name>` turns that into the
/// domain error's `NotFound(id)`, for pages that cannot render without the
/// record. Every other failure is converted into the client's domain error.
#[macro_export]
macro_rules! impl_client_lookup {
    ($client_name:ident, $entity:ty, $error:ident, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](&self, id: String) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err($error::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<fetch_ $entity_name_snake>](&self, id: String) -> Result<$entity, $error> {
                    match self.[<get_ $entity_name_snake>](id.clone()).await? {
                        Some(found) => Ok(found),
                        None => {
                            tracing::debug!("Record missing");
                            Err($error::NotFound(id))
                        }
                    }
                }
            }
        }
    };
}

/// Lookups plus `delete_<name>`.
#[macro_export]
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $error:ident, $entity_name_snake:ident) => {
        impl_client_lookup!($client_name, $entity, $error, $entity_name_snake);

        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](&self, id: String) -> Result<(), $error> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await.map_err($error::from)
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ident, $entity_name_snake:ident) => {
        impl_client_new!($client_name, $entity);
        impl_client_methods!($client_name, $entity, $error, $entity_name_snake);
    };
}
