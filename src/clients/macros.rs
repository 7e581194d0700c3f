/// Generates a page client method: sends the request variant with a oneshot
/// responder and waits for the answer, with tracing on the way out.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        #[allow(dead_code)]
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $crate::page_actor::PageError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $crate::page_actor::PageError::ActorCommunicationError("Page closed".to_string()))?;

                response
                    .await
                    .map_err(|_| $crate::page_actor::PageError::ActorCommunicationError("Page dropped".to_string()))?
            }
        }
    };
}
