use crate::models::CurrentUser;

/// Base template trait providing common properties for all templates.
pub trait BaseTemplate {
    fn current_user(&self) -> &Option<CurrentUser>;
    fn refresh_seconds(&self) -> u64;
}

/// Macro to implement BaseTemplate for a struct with standard fields
#[macro_export]
macro_rules! impl_base_template {
    ($struct_name:ty) => {
        impl $crate::templates::BaseTemplate for $struct_name {
            fn current_user(&self) -> &Option<$crate::models::CurrentUser> {
                &self.current_user
            }
            fn refresh_seconds(&self) -> u64 {
                self.refresh_seconds
            }
        }
    };
}
