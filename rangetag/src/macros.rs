macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Shorthand for return Err(RangetagError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(RangetagError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(RangetagError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::RangetagError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:expr)) => {
		return Err(crate::error::RangetagError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for TagDecodingError::new(TagFormat::Foo, "Message")
//
// Usage:
//
// - decode_err!(Variant, Message)
// - decode_err!(Message)
//
// or bail:
//
// - decode_err!(@BAIL Variant, Message)
// - decode_err!(@BAIL Message)
macro_rules! decode_err {
	($tag_format:ident, $reason:literal) => {
		Into::<crate::error::RangetagError>::into(crate::error::TagDecodingError::new(
			crate::tag::TagFormat::$tag_format,
			$reason,
		))
	};
	($reason:literal) => {
		Into::<crate::error::RangetagError>::into(crate::error::TagDecodingError::from_description(
			$reason,
		))
	};
	(@BAIL $($tag_format:ident,)? $reason:literal) => {
		return Err(decode_err!($($tag_format,)? $reason))
	};
}

pub(crate) use {decode_err, err, try_vec};
