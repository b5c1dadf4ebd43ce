use service::ProductService;

#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
}
