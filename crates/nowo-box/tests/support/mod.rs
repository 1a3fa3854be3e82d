pub mod mock_nowo;
