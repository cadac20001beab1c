//! Contract bindings.

use alloy::sol;

sol! {
    /// Read/write surface of the deployed lottery contract.
    #[sol(rpc)]
    interface Lottery {
        function betFee() external view returns (uint256);
        function betPrice() external view returns (uint256);
        function betsOpen() external view returns (bool);
        function betsClosingTime() external view returns (uint256);
        function isOwner(address account) external view returns (bool);
        function prizeAmount(address account) external view returns (uint256);
        function prizePool() external view returns (uint256);
        function ownerPool() external view returns (uint256);
        function tokenBalance(address account) external view returns (uint256);
        function tokenSymbol() external view returns (string);
        function isWinner(address account) external view returns (bool);
        function isLotteryClosed() external view returns (bool);
        function isPastLotteryClosingTime() external view returns (bool);

        function startLottery(uint256 closingTime, address owner) external;
        function closeLottery() external;
    }
}

sol! {
    /// Contract-wallet signature check.
    #[sol(rpc)]
    interface IERC1271 {
        function isValidSignature(bytes32 hash, bytes signature) external view returns (bytes4 magicValue);
    }
}

/// Value `isValidSignature` returns for an accepted signature.
pub const ERC1271_MAGIC_VALUE: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];
