//! Declarative record definitions.

/// Define a flat configuration struct and its [`EnvConfig`](crate::EnvConfig) impl.
///
/// Each field is `name: Type` with an optional `= default`. Field types must
/// implement [`FromValue`](crate::FromValue), so unsupported types are
/// rejected at compile time.
///
/// ```
/// use env_record::{Mode, env_config, gather_config_with};
/// use std::collections::HashMap;
///
/// env_config! {
///     #[derive(Debug)]
///     pub struct ServerConfig {
///         pub host: String,
///         pub port: u16 = 8080,
///         pub debug: bool,
///     }
/// }
///
/// let env = HashMap::from([("HOST".to_string(), "localhost".to_string())]);
/// let config: ServerConfig = gather_config_with(Mode::Lenient, &env).unwrap();
/// assert_eq!(config.host, "localhost");
/// assert_eq!(config.port, 8080);
/// assert!(!config.debug);
/// ```
#[macro_export]
macro_rules! env_config {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::EnvConfig for $name {
            fn schema() -> $crate::Schema {
                $crate::Schema::new(stringify!($name))
                    $(
                        .push({
                            let decl = $crate::FieldDecl::new(
                                stringify!($field),
                                <$ty as $crate::FromValue>::TYPE_TAG.to_string(),
                            );
                            $(
                                let default: $ty = $default;
                                let decl = decl.with_default(default);
                            )?
                            decl
                        })
                    )*
            }

            #[allow(unused_variables)]
            fn from_fields(
                fields: &mut $crate::ResolvedFields,
            ) -> ::std::result::Result<Self, $crate::ConfigError> {
                ::std::result::Result::Ok(Self {
                    $(
                        $field: fields.take::<$ty>(stringify!($field))?,
                    )*
                })
            }
        }
    };
}
