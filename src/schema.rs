diesel::table! {
    products (id) {
        id -> Uuid,
        #[max_length = 200]
        title -> Varchar,
        description -> Nullable<Text>,
        price -> Numeric,
        stock -> Int4,
        category_id -> Nullable<Uuid>,
        images -> Array<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    orders (id) {
        id -> Uuid,
        customer_id -> Uuid,
        #[max_length = 255]
        email -> Varchar,
        subtotal -> Numeric,
        #[max_length = 50]
        coupon_code -> Nullable<Varchar>,
        discount_amount -> Numeric,
        total_price -> Numeric,
        #[max_length = 50]
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    order_lines (id) {
        id -> Uuid,
        order_id -> Uuid,
        product_id -> Uuid,
        quantity -> Int4,
        unit_price -> Numeric,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(order_lines -> orders (order_id));
diesel::joinable!(order_lines -> products (product_id));

diesel::allow_tables_to_appear_in_same_query!(products, orders, order_lines,);
